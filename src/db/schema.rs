//! Database schema and migrations.
//!
//! Migrations are applied in order when the database is opened; the
//! `schema_version` table records which ones have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: users (credential store)
    r#"
CREATE TABLE users (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    user_name       TEXT NOT NULL UNIQUE,
    email           TEXT NOT NULL UNIQUE COLLATE NOCASE,
    password_hash   TEXT NOT NULL,           -- Argon2 PHC string
    address         TEXT,
    phone_number    TEXT,
    role            TEXT NOT NULL DEFAULT 'buyer' CHECK (role IN ('buyer', 'seller')),
    description     TEXT,
    profile_picture TEXT,
    instagram_link  TEXT,
    created_at      TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at      TEXT
);

CREATE INDEX idx_users_role ON users(role);
"#,
    // v2: seller shops
    r#"
CREATE TABLE shops (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    seller_id           INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    shop_name           TEXT NOT NULL,
    shop_description    TEXT NOT NULL DEFAULT '',
    shop_address        TEXT NOT NULL DEFAULT '',
    created_at          TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at          TEXT
);

CREATE INDEX idx_shops_seller_id ON shops(seller_id);
"#,
    // v3: products
    r#"
CREATE TABLE products (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    shop_id         INTEGER NOT NULL REFERENCES shops(id) ON DELETE CASCADE,
    product_name    TEXT NOT NULL,
    description     TEXT NOT NULL DEFAULT '',
    price           REAL NOT NULL CHECK (price >= 0),
    stock           INTEGER NOT NULL DEFAULT 0 CHECK (stock >= 0),
    created_at      TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at      TEXT
);

CREATE INDEX idx_products_shop_id ON products(shop_id);
"#,
    // v4: orders
    r#"
CREATE TABLE orders (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    buyer_id    INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    amount      REAL NOT NULL DEFAULT 0 CHECK (amount >= 0),
    status      TEXT NOT NULL DEFAULT 'pending'
                CHECK (status IN ('pending', 'paid', 'shipped', 'delivered', 'cancelled')),
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at  TEXT
);

CREATE INDEX idx_orders_buyer_id ON orders(buyer_id);
"#,
    // v5: order items
    r#"
CREATE TABLE order_items (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    order_id    INTEGER NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
    product_id  INTEGER NOT NULL REFERENCES products(id),
    quantity    INTEGER NOT NULL CHECK (quantity > 0),
    price       REAL NOT NULL CHECK (price >= 0),
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at  TEXT
);

CREATE INDEX idx_order_items_order_id ON order_items(order_id);
"#,
    // v6: ratings
    r#"
CREATE TABLE ratings (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    order_id    INTEGER NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
    buyer_id    INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    shop_id     INTEGER NOT NULL REFERENCES shops(id) ON DELETE CASCADE,
    rating      INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
    feedback    TEXT NOT NULL DEFAULT '',
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at  TEXT
);

CREATE INDEX idx_ratings_shop_id ON ratings(shop_id);
"#,
];

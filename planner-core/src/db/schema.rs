pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS clients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (length(trim(name)) > 0),
    address TEXT,
    phone TEXT
);

CREATE TABLE IF NOT EXISTS plan_assignments (
    year INTEGER NOT NULL,
    month INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
    day INTEGER NOT NULL CHECK (day BETWEEN 1 AND 31),
    client_id INTEGER NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
    crew TEXT NOT NULL CHECK (crew IN ('R1', 'R2')),
    external_lab INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (year, month, day, client_id)
);

CREATE INDEX IF NOT EXISTS idx_plan_month ON plan_assignments(year, month);
CREATE INDEX IF NOT EXISTS idx_plan_client ON plan_assignments(client_id);
"#;

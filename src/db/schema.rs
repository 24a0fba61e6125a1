pub const SCHEMA: &str = r#"
-- podcast table
CREATE TABLE IF NOT EXISTS podcast (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL
);

-- episode table
-- foreign_keys stays off: deleting a podcast leaves its episodes behind
CREATE TABLE IF NOT EXISTS episode (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    podcast_id INTEGER NOT NULL REFERENCES podcast(id),
    is_played INTEGER NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_episode_podcast_id ON episode(podcast_id);
CREATE INDEX IF NOT EXISTS idx_episode_is_played ON episode(is_played);
"#;

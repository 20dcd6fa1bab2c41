//! Fixed-response business handlers.

pub async fn hello() -> &'static str {
    "Hello, world!"
}

pub async fn decide() -> &'static str {
    "decide handler"
}

pub async fn activate() -> &'static str {
    "activate handler"
}

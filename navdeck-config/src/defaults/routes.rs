//! Default route paths.

pub fn home_path() -> String {
    "/home".to_string()
}

pub fn login_path() -> String {
    "/login".to_string()
}

pub fn not_found_path() -> String {
    "/404".to_string()
}

pub fn forbidden_path() -> String {
    "/403".to_string()
}

/// Paths reachable without a signed-in session.
pub fn white_list() -> Vec<String> {
    vec![login_path(), not_found_path(), forbidden_path()]
}

fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

/// Derive an endpoint type name from HTTP method + path when the operation
/// has no `operationId`.
///
/// Braces are dropped, then every run of characters outside `[a-zA-Z0-9_]`
/// collapses into a single `_`:
/// - `get /users` → `get_users`
/// - `get /users/{id}` → `get_users_id`
/// - `post /users/{id}/` → `post_users_id_`
/// - `get /v1.2/items-list` → `get_v1_2_items_list`
pub fn type_name_from_route(method: &str, path: &str) -> String {
    let mut name = String::with_capacity(method.len() + path.len());
    name.push_str(method);

    let mut in_separator_run = false;
    for ch in path.chars().filter(|&ch| ch != '{' && ch != '}') {
        if is_word_char(ch) {
            name.push(ch);
            in_separator_run = false;
        } else if !in_separator_run {
            name.push('_');
            in_separator_run = true;
        }
    }

    name
}

/// Replace every character outside `[a-zA-Z0-9_]` with `_`, one for one.
pub fn sanitize_parameter_name(name: &str) -> String {
    name.chars()
        .map(|ch| if is_word_char(ch) { ch } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_simple() {
        assert_eq!(type_name_from_route("get", "/users"), "get_users");
    }

    #[test]
    fn test_route_with_param() {
        assert_eq!(type_name_from_route("get", "/users/{id}"), "get_users_id");
    }

    #[test]
    fn test_route_trailing_slash() {
        assert_eq!(type_name_from_route("post", "/users/{id}/"), "post_users_id_");
    }

    #[test]
    fn test_route_collapses_runs() {
        assert_eq!(
            type_name_from_route("get", "/v1.2/items-list"),
            "get_v1_2_items_list"
        );
        assert_eq!(type_name_from_route("get", "/a/{b}/-c"), "get_a_b_c");
    }

    #[test]
    fn test_route_adjacent_params() {
        // Braces vanish before collapsing, so the two names fuse.
        assert_eq!(type_name_from_route("delete", "/{a}{b}"), "delete_ab");
    }

    #[test]
    fn test_root_path() {
        assert_eq!(type_name_from_route("get", "/"), "get_");
    }

    #[test]
    fn test_sanitize_parameter() {
        assert_eq!(sanitize_parameter_name("user-id"), "user_id");
        assert_eq!(sanitize_parameter_name("a..b"), "a__b");
        assert_eq!(sanitize_parameter_name("page[size]"), "page_size_");
        assert_eq!(sanitize_parameter_name("already_ok9"), "already_ok9");
    }
}

use super::*;

#[test]
fn unauthenticated_session_shows_login() {
    assert_eq!(View::for_session(&Session::default()), View::Login);
}

#[test]
fn authenticated_session_shows_main() {
    let session = Session { authenticated: true, token: Some("tok".to_owned()) };
    assert_eq!(View::for_session(&session), View::Main);
}

#[test]
fn view_depends_only_on_authenticated_flag() {
    let session = Session { authenticated: false, token: Some("stale".to_owned()) };
    assert_eq!(View::for_session(&session), View::Login);
}

#[test]
fn menu_lists_brand_and_navigation_entries() {
    let menu = render_menu();
    assert!(menu.starts_with("MILITARY-GRADE\nQUANTUM ENCRYPTION\n"));
    for page in NAVIGATION {
        assert!(menu.contains(page.title()));
        assert!(menu.contains(page.path()));
    }
    assert!(!menu.contains("/agent-management"));
}

#[test]
fn page_render_has_title_and_summary() {
    let text = render_page(Page::KeyManagement);
    assert!(text.starts_with("Key Management\n"));
    assert!(text.contains("revoke quantum and classical keys"));
}

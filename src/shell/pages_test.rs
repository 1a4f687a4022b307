use std::collections::HashSet;

use super::*;

#[test]
fn all_pages_have_unique_paths() {
    let paths: HashSet<&str> = Page::ALL.iter().map(|p| p.path()).collect();
    assert_eq!(paths.len(), Page::ALL.len());
}

#[test]
fn navigation_is_subset_in_menu_order() {
    assert_eq!(NAVIGATION[0], Page::Dashboard);
    assert_eq!(NAVIGATION[7], Page::SystemConfiguration);
    for page in NAVIGATION {
        assert!(Page::ALL.contains(&page));
    }
}

#[test]
fn from_path_resolves_root_to_dashboard() {
    assert_eq!(Page::from_path("/"), Some(Page::Dashboard));
    assert_eq!(Page::from_path(""), Some(Page::Dashboard));
}

#[test]
fn from_path_round_trips_every_page() {
    for page in Page::ALL {
        assert_eq!(Page::from_path(page.path()), Some(page));
    }
}

#[test]
fn from_path_tolerates_missing_or_trailing_slash() {
    assert_eq!(Page::from_path("key-management"), Some(Page::KeyManagement));
    assert_eq!(Page::from_path("/pqc-research/"), Some(Page::PqcResearch));
}

#[test]
fn from_path_unknown_is_none() {
    assert_eq!(Page::from_path("/quantum-teleporter"), None);
}

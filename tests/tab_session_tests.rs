//! Tab session behaviour driven through route trees built from the sample
//! permission forest.

mod common;

use common::sample_tree;
use navdeck::router::build_route_tree;
use navdeck::tab::TitleResolver;
use navdeck::{Config, RecordingNavigator, Tab, TabSession};

fn keys(session: &TabSession) -> Vec<&str> {
    session.tabs().iter().map(|t| t.key.as_str()).collect()
}

#[test]
fn test_titles_follow_fallback_chain() {
    let routes = build_route_tree(sample_tree().roots());
    let mut session = TabSession::new(&Config::default());

    session.on_navigate("/management/system/user", &routes);
    session.on_navigate("/management/reports/index", &routes);
    session.on_navigate("/not/in/tree", &routes);

    let labels: Vec<&str> = session.tabs().iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["首页", "User", "Reports", "Tree"]);
}

#[test]
fn test_root_and_unknown_titles() {
    let titles = TitleResolver::from_config(&Config::default());
    assert_eq!(titles.resolve("/", None), "首页");
    assert_eq!(titles.resolve("/home", None), "首页");
    assert_eq!(titles.resolve("", None), "未命名页面");
    assert_eq!(titles.resolve("/reports/index", None), "Reports");
}

#[test]
fn test_repeated_navigation_is_idempotent() {
    let routes = build_route_tree(sample_tree().roots());
    let mut session = TabSession::new(&Config::default());
    session.on_navigate("/dashboard/workbench", &routes);
    session.on_navigate("/dashboard/analysis", &routes);
    let before: Vec<String> = keys(&session).iter().map(|k| k.to_string()).collect();

    session.on_navigate("/dashboard/workbench", &routes);
    session.on_navigate("/dashboard/workbench", &routes);

    assert_eq!(keys(&session), before);
    assert_eq!(session.active_key(), "/dashboard/workbench");
}

#[test]
fn test_remove_active_reattaches_previous() {
    let mut session = TabSession::new(&Config::default());
    for path in ["/a", "/b", "/c"] {
        session.on_navigate(path, &[]);
    }
    let mut nav = RecordingNavigator::new();
    session.set_active_tab("/b", &mut nav);
    nav.drain();

    session.remove_tab("/b", &mut nav);
    assert_eq!(keys(&session), vec!["/home", "/a", "/c"]);
    assert_eq!(session.active_key(), "/a");
    assert_eq!(nav.history, vec!["/a".to_string()]);
}

#[test]
fn test_never_empty() {
    let mut session = TabSession::new(&Config::default());
    let mut nav = RecordingNavigator::new();
    session.remove_tab("/home", &mut nav);
    session.remove_all(&mut nav);
    assert_eq!(session.tab_count(), 1);
    assert_eq!(session.active_key(), "/home");
}

#[test]
fn test_remove_all_with_home() {
    let mut session = TabSession::new(&Config::default());
    session.on_navigate("/a", &[]);
    session.on_navigate("/b", &[]);
    let mut nav = RecordingNavigator::new();
    session.remove_all(&mut nav);
    assert_eq!(keys(&session), vec!["/home"]);
    assert_eq!(session.active_key(), "/home");
    assert_eq!(nav.last(), Some("/home"));
    assert_eq!(session.retained_keys(), vec!["/home"]);
}

#[test]
fn test_remove_all_promotes_first_tab() {
    let mut session = TabSession::new(&Config::default());
    session.add_tab(Tab::new("/x", "X", true));
    session.add_tab(Tab::new("/y", "Y", true));
    let mut nav = RecordingNavigator::new();
    session.remove_tab("/home", &mut nav);

    session.remove_all(&mut nav);
    assert_eq!(keys(&session), vec!["/x"]);
    assert!(!session.tabs()[0].closable);
    assert_eq!(session.active_key(), "/x");
}

#[test]
fn test_custom_home_path() {
    let config = Config {
        home_path: "/dashboard/workbench".to_string(),
        home_label: "Home".to_string(),
        ..Config::default()
    };
    let mut session = TabSession::new(&config);
    assert_eq!(keys(&session), vec!["/dashboard/workbench"]);
    // Navigating to the home path reuses the seeded tab.
    session.on_navigate("/dashboard/workbench", &[]);
    assert_eq!(session.tab_count(), 1);
    assert!(!session.active_tab().unwrap().closable);
    assert_eq!(session.active_tab().unwrap().label, "Home");
}

#[test]
fn test_uncached_tab_released_when_inactive() {
    let mut session = TabSession::new(&Config::default());
    session.add_tab(Tab::new("/report", "Report", true).with_cached(false));
    session.mark_rendered("/report");
    assert!(session.is_retained("/report"));

    let mut nav = RecordingNavigator::new();
    session.set_active_tab("/home", &mut nav);
    assert!(!session.is_retained("/report"));
    assert!(session.is_retained("/home"));
    // Cached flag survives re-adding the same path.
    session.add_tab(Tab::new("/report", "Other", true));
    assert!(!session.get_tab("/report").unwrap().cached);
}

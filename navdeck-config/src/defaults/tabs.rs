//! Default labels for the tab strip.

pub fn home_label() -> String {
    "首页".to_string()
}

pub fn untitled_label() -> String {
    "未命名页面".to_string()
}

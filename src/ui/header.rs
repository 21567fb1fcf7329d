use gtk4 as gtk;
use libadwaita as adw;

use adw::prelude::*;
use gtk::{gio, Orientation};

#[derive(Clone)]
pub struct HeaderComponents {
    pub header_bar: adw::HeaderBar,
    pub fullscreen_btn: gtk::Button,
    pub area_btn: gtk::Button,
}

pub fn create_header_bar() -> HeaderComponents {
    let fullscreen_btn = gtk::Button::builder()
        .child(&button_content("Full Screen", "view-fullscreen-symbolic"))
        .tooltip_text("Capture Full Screen (Ctrl+Shift+F)")
        .build();
    fullscreen_btn.add_css_class("suggested-action");

    let area_btn = gtk::Button::builder()
        .child(&button_content("Select Area", "edit-select-all-symbolic"))
        .tooltip_text("Capture Area (Ctrl+Shift+A)")
        .build();

    let capture_box = gtk::Box::builder()
        .orientation(Orientation::Horizontal)
        .build();
    capture_box.add_css_class("linked");
    capture_box.append(&fullscreen_btn);
    capture_box.append(&area_btn);

    let menu = gio::Menu::new();
    menu.append(Some("Keyboard Shortcuts"), Some("win.show-shortcuts"));
    menu.append(Some("Minimize to Tray"), Some("win.minimize-to-tray"));
    menu.append(Some("Quit"), Some("app.quit"));

    let menu_btn = gtk::MenuButton::builder()
        .icon_name("open-menu-symbolic")
        .menu_model(&menu)
        .build();

    let title = adw::WindowTitle::new(crate::APP_NAME, "");

    let header_bar = adw::HeaderBar::builder().title_widget(&title).build();
    header_bar.pack_start(&capture_box);
    header_bar.pack_end(&menu_btn);

    HeaderComponents {
        header_bar,
        fullscreen_btn,
        area_btn,
    }
}

fn button_content(label: &str, icon_name: &str) -> adw::ButtonContent {
    adw::ButtonContent::builder()
        .label(label)
        .icon_name(icon_name)
        .build()
}

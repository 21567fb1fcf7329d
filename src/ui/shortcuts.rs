use adw::prelude::*;
use gtk4 as gtk;
use libadwaita as adw;

use crate::app::config::Action;
use crate::app::AppConfig;

pub fn show_shortcuts_dialog(config: &AppConfig, parent: &impl IsA<gtk::Window>) {
    let window = adw::PreferencesWindow::builder()
        .transient_for(parent)
        .modal(true)
        .title("Keyboard Shortcuts")
        .default_width(500)
        .default_height(520)
        .search_enabled(false)
        .build();

    let page = adw::PreferencesPage::new();
    window.add(&page);

    let group_window = adw::PreferencesGroup::builder()
        .title("In Window")
        .build();
    for action in Action::all() {
        add_shortcut_row(
            &group_window,
            action.label(),
            &config.shortcuts.get_shortcut_label(*action),
        );
    }
    page.add(&group_window);

    let group_global = adw::PreferencesGroup::builder()
        .title("Global")
        .description("Work while the app is hidden in the tray")
        .build();
    add_shortcut_row(
        &group_global,
        Action::CaptureFullScreen.label(),
        &config.global_shortcuts.fullscreen,
    );
    add_shortcut_row(
        &group_global,
        Action::CaptureArea.label(),
        &config.global_shortcuts.area,
    );
    page.add(&group_global);

    window.present();
}

fn add_shortcut_row(group: &adw::PreferencesGroup, title: &str, accel_label: &str) {
    let row = adw::ActionRow::builder().title(title).build();

    let label = gtk::Label::builder()
        .label(if accel_label.is_empty() {
            "Disabled"
        } else {
            accel_label
        })
        .valign(gtk::Align::Center)
        .build();
    label.add_css_class("dim-label");

    row.add_suffix(&label);
    group.add(&row);
}

use gtk4 as gtk;

use gtk::{Align, Orientation};
use gtk4::prelude::*;

/// Save / Copy / Clear, floating over the preview while a capture exists.
#[derive(Clone)]
pub struct ToolbarComponents {
    pub actions_box: gtk::Box,
    pub save_btn: gtk::Button,
    pub copy_btn: gtk::Button,
    pub clear_btn: gtk::Button,
}

impl ToolbarComponents {
    pub fn set_has_image(&self, has_image: bool) {
        self.actions_box.set_visible(has_image);
    }
}

pub fn create_toolbar() -> ToolbarComponents {
    let save_btn = gtk::Button::builder()
        .icon_name("document-save-symbolic")
        .tooltip_text("Save to File")
        .build();
    save_btn.add_css_class("suggested-action");

    let copy_btn = gtk::Button::builder()
        .icon_name("edit-copy-symbolic")
        .tooltip_text("Copy to Clipboard")
        .build();
    copy_btn.add_css_class("flat");

    let clear_btn = gtk::Button::builder()
        .icon_name("user-trash-symbolic")
        .tooltip_text("Clear Screenshot")
        .build();
    clear_btn.add_css_class("flat");

    let actions_box = gtk::Box::builder()
        .orientation(Orientation::Horizontal)
        .spacing(6)
        .halign(Align::Center)
        .valign(Align::End)
        .margin_bottom(24)
        .visible(false)
        .build();
    actions_box.add_css_class("osd");
    actions_box.add_css_class("toolbar");

    actions_box.append(&clear_btn);
    actions_box.append(&copy_btn);
    actions_box.append(&save_btn);

    ToolbarComponents {
        actions_box,
        save_btn,
        copy_btn,
        clear_btn,
    }
}

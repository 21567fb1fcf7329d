//! Fullscreen selection overlay
//!
//! Shows the preview frame of an area capture and the rectangle being
//! dragged over it. Pointer input is wired up in `handlers`.

use gtk4 as gtk;
use libadwaita as adw;

use gtk::gdk_pixbuf::Pixbuf;
use gtk::{Align, DrawingArea};
use gtk4::prelude::*;
use image::RgbaImage;
use std::cell::RefCell;
use std::rc::Rc;

use super::drawing::image_to_pixbuf;
use crate::app::AppState;
use crate::capture::geometry::Rect;
use crate::capture::Size;

// #3498db
const SELECTION_RGB: (f64, f64, f64) = (52.0 / 255.0, 152.0 / 255.0, 219.0 / 255.0);

#[derive(Clone)]
pub struct OverlayComponents {
    pub window: gtk::Window,
    pub drawing_area: DrawingArea,
    pub toast_overlay: adw::ToastOverlay,
    pub cancel_btn: gtk::Button,
    background: Rc<RefCell<Option<Pixbuf>>>,
}

impl OverlayComponents {
    pub fn open(&self, preview: &RgbaImage) {
        *self.background.borrow_mut() = Some(image_to_pixbuf(preview));
        self.window.fullscreen();
        self.window.present();
        self.drawing_area.queue_draw();
    }

    pub fn close(&self) {
        self.window.set_visible(false);
        self.background.borrow_mut().take();
    }

    /// Size of the surface selections are measured on.
    pub fn surface_size(&self) -> Size {
        Size::new(
            self.drawing_area.width().max(0) as u32,
            self.drawing_area.height().max(0) as u32,
        )
    }
}

pub fn create_overlay(app: &adw::Application, state: &Rc<RefCell<AppState>>) -> OverlayComponents {
    let background: Rc<RefCell<Option<Pixbuf>>> = Rc::new(RefCell::new(None));

    let drawing_area = DrawingArea::builder().hexpand(true).vexpand(true).build();
    drawing_area.set_cursor_from_name(Some("crosshair"));
    drawing_area.set_draw_func({
        let state = state.clone();
        let background = background.clone();
        move |_, cr, width, height| {
            let selection = state
                .try_borrow()
                .ok()
                .and_then(|s| s.selection.current())
                .map(|sel| sel.rectangle());
            draw_overlay(
                background.borrow().as_ref(),
                selection,
                cr,
                width as f64,
                height as f64,
            );
        }
    });

    let hint = gtk::Label::new(Some("Drag to select an area. Press Esc to cancel."));

    let cancel_btn = gtk::Button::builder()
        .icon_name("process-stop-symbolic")
        .tooltip_text("Cancel Selection")
        .build();
    cancel_btn.add_css_class("destructive-action");

    let hint_box = gtk::Box::builder()
        .orientation(gtk::Orientation::Horizontal)
        .spacing(12)
        .halign(Align::Center)
        .valign(Align::Start)
        .margin_top(24)
        .build();
    hint_box.add_css_class("osd");
    hint_box.add_css_class("toolbar");
    hint_box.append(&hint);
    hint_box.append(&cancel_btn);

    let overlay = gtk::Overlay::builder().child(&drawing_area).build();
    overlay.add_overlay(&hint_box);

    let toast_overlay = adw::ToastOverlay::new();
    toast_overlay.set_child(Some(&overlay));

    let window = gtk::Window::builder()
        .application(app)
        .title("Select Area")
        .decorated(false)
        .child(&toast_overlay)
        .build();

    OverlayComponents {
        window,
        drawing_area,
        toast_overlay,
        cancel_btn,
        background,
    }
}

fn draw_overlay(
    background: Option<&Pixbuf>,
    selection: Option<Rect>,
    cr: &gtk::cairo::Context,
    width: f64,
    height: f64,
) {
    cr.set_source_rgb(0.0, 0.0, 0.0);
    let _ = cr.paint();

    // Stretched to the surface, so selections map back per axis.
    if let Some(pixbuf) = background.filter(|p| p.width() > 0 && p.height() > 0) {
        let _ = cr.save();
        cr.scale(width / pixbuf.width() as f64, height / pixbuf.height() as f64);
        cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        let _ = cr.paint();
        let _ = cr.restore();
    }

    if let Some(rect) = selection {
        let (r, g, b) = SELECTION_RGB;
        cr.rectangle(rect.x, rect.y, rect.width, rect.height);
        cr.set_source_rgba(r, g, b, 0.1);
        let _ = cr.fill_preserve();

        cr.set_source_rgb(r, g, b);
        cr.set_line_width(2.0);
        cr.set_dash(&[5.0, 5.0], 0.0);
        let _ = cr.stroke();
    }
}

use gtk4 as gtk;

use gtk::gdk_pixbuf::{Colorspace, Pixbuf};
use gtk::{glib, DrawingArea};
use gtk4::prelude::*;
use image::RgbaImage;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone)]
pub struct DrawingComponents {
    pub drawing_area: DrawingArea,
    pub placeholder_icon: gtk::Image,
    pixbuf: Rc<RefCell<Option<Pixbuf>>>,
}

impl DrawingComponents {
    /// Show `image` in the preview, or the placeholder when `None`.
    pub fn set_image(&self, image: Option<&RgbaImage>) {
        *self.pixbuf.borrow_mut() = image.map(image_to_pixbuf);
        self.placeholder_icon.set_visible(image.is_none());
        self.drawing_area.queue_draw();
    }
}

pub fn create_drawing_area() -> DrawingComponents {
    let drawing_area = DrawingArea::builder().hexpand(true).vexpand(true).build();
    let pixbuf = Rc::new(RefCell::new(None));

    drawing_area.set_draw_func({
        let pixbuf = pixbuf.clone();
        move |_, cr, width, height| {
            draw_preview(pixbuf.borrow().as_ref(), cr, width as f64, height as f64);
        }
    });

    let placeholder_icon = gtk::Image::builder()
        .icon_name("camera-photo-symbolic")
        .pixel_size(128)
        .opacity(0.2)
        .halign(gtk::Align::Center)
        .valign(gtk::Align::Center)
        .build();

    DrawingComponents {
        drawing_area,
        placeholder_icon,
        pixbuf,
    }
}

pub fn image_to_pixbuf(image: &RgbaImage) -> Pixbuf {
    let width = image.width() as i32;
    let height = image.height() as i32;
    let stride = width * 4; // RGBA = 4 bytes per pixel
    let bytes = glib::Bytes::from(image.as_raw().as_slice());

    Pixbuf::from_bytes(&bytes, Colorspace::Rgb, true, 8, width, height, stride)
}

/// Offset and uniform scale that fit `image` inside `area`, centered.
pub fn fit_transform(image: (f64, f64), area: (f64, f64)) -> (f64, f64, f64) {
    let scale = (area.0 / image.0).min(area.1 / image.1);
    let offset_x = (area.0 - image.0 * scale) / 2.0;
    let offset_y = (area.1 - image.1 * scale) / 2.0;
    (scale, offset_x, offset_y)
}

fn draw_preview(pixbuf: Option<&Pixbuf>, cr: &gtk::cairo::Context, width: f64, height: f64) {
    cr.set_source_rgb(0.14, 0.14, 0.14);
    let _ = cr.paint();

    let Some(pixbuf) = pixbuf else {
        return;
    };
    if pixbuf.width() == 0 || pixbuf.height() == 0 {
        return;
    }

    let (scale, offset_x, offset_y) = fit_transform(
        (pixbuf.width() as f64, pixbuf.height() as f64),
        (width, height),
    );

    let _ = cr.save();
    cr.translate(offset_x, offset_y);
    cr.scale(scale, scale);
    cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
    let _ = cr.paint();
    let _ = cr.restore();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_image_is_letterboxed() {
        let (scale, ox, oy) = fit_transform((2000.0, 1000.0), (1000.0, 1000.0));
        assert_eq!(scale, 0.5);
        assert_eq!(ox, 0.0);
        assert_eq!(oy, 250.0);
    }

    #[test]
    fn tall_image_is_pillarboxed() {
        let (scale, ox, oy) = fit_transform((500.0, 1000.0), (1000.0, 500.0));
        assert_eq!(scale, 0.5);
        assert_eq!(ox, 375.0);
        assert_eq!(oy, 0.0);
    }
}

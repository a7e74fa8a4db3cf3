pub mod cairo_device;

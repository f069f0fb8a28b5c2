//! Headless demo: paints a few strokes with each device kind and saves
//! the result as a PNG.
//!
//! Run with `cargo run --example scribble [output.png]`.

use glam::Vec2;

use ebru_canvas::{
    CanvasHost, DeviceKind, DirtyRect, Hsva, PaintCanvas, Sample, ValuatorMode,
};
use ebru_config::CanvasConfig;

struct StderrHost;

impl CanvasHost for StderrHost {
    fn request_redisplay(&mut self, _region: Option<DirtyRect>) {}

    fn advisory(&mut self, advisory: ebru_canvas::Advisory) {
        eprintln!("advisory: {advisory}");
    }
}

fn stroke(canvas: &mut PaintCanvas, host: &mut StderrHost, device: DeviceKind, y: f32) {
    let sample = |x: f32, pressure: f32, rotation: f32| Sample {
        pos: Vec2::new(x, y + (x / 40.0).sin() * 30.0),
        pressure,
        rotation,
        device,
        ..Default::default()
    };

    canvas.on_press(sample(40.0, 0.2, 0.0), host);
    let mut x = 44.0;
    while x <= 460.0 {
        let pressure = 0.2 + 0.8 * ((x - 40.0) / 420.0);
        canvas.on_move(sample(x, pressure, x * 0.5), host);
        x += 4.0;
    }
    canvas.on_release(sample(460.0, 0.0, 0.0), host);
}

fn main() {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "scribble.png".to_string());

    let mut canvas = PaintCanvas::with_config(&CanvasConfig::new(500, 500));
    let mut host = StderrHost;
    canvas.set_width_mode(ValuatorMode::Pressure);
    canvas.set_alpha_mode(ValuatorMode::Pressure);

    canvas.set_pen_color(Hsva::from_rgba([30, 60, 200, 255]));
    stroke(&mut canvas, &mut host, DeviceKind::Stylus, 100.0);

    canvas.set_pen_color(Hsva::from_rgba([200, 60, 30, 255]));
    stroke(&mut canvas, &mut host, DeviceKind::Airbrush, 250.0);

    canvas.set_pen_color(Hsva::from_rgba([30, 160, 60, 255]));
    stroke(&mut canvas, &mut host, DeviceKind::RotationStylus, 400.0);

    // Skipped with an advisory, on purpose
    let puck = |x: f32| Sample {
        pos: Vec2::new(x, 470.0),
        pressure: 1.0,
        device: DeviceKind::Puck,
        ..Default::default()
    };
    canvas.on_press(puck(40.0), &mut host);
    canvas.on_move(puck(460.0), &mut host);
    canvas.on_release(puck(460.0), &mut host);

    let path = std::path::Path::new(&output);
    match canvas.save(path) {
        Ok(()) => {
            let saved = ebru_canvas::load_buffer(path).expect("just written");
            println!("wrote {} ({}x{})", output, saved.width, saved.height);
        }
        Err(err) => eprintln!("{err}"),
    }
}

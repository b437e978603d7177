use filter_pipeline::{MemorySink, PixelBuffer, RawValue, Session};
use image::{Rgba, RgbaImage};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let output_dir = Path::new("tmp");
    std::fs::create_dir_all(output_dir)?;

    let mut img = RgbaImage::new(400, 300);
    for y in 0..300 {
        for x in 0..400 {
            let r = (x * 255 / 400) as u8;
            let g = (y * 255 / 300) as u8;
            let b = ((x + y) * 255 / 700) as u8;
            img.put_pixel(x, y, Rgba([r, g, b, 255]));
        }
    }

    let mut session = Session::without_labels(MemorySink::new());
    session.load_image(PixelBuffer::from_image(img)?)?;

    let steps: [(&str, RawValue); 6] = [
        ("redChannel", 60.into()),
        ("greenChannel", (-40).into()),
        ("blueChannel", 90.into()),
        ("brightness", 35.into()),
        ("grayscale", true.into()),
        ("grayscale", false.into()),
    ];

    for (i, (name, value)) in steps.into_iter().enumerate() {
        if !session.try_set(name, Some(value)) {
            println!("✗ Rejected {name}={value:?}");
            continue;
        }

        let filename = format!("{:02}_{}.png", i, name);
        if let Some(frame) = session.sink().frame() {
            frame.as_image().save(output_dir.join(&filename))?;
            println!("✓ Generated {}", filename);
        }
    }

    println!("\n✓ All filter steps applied successfully!");
    println!("  Images saved to: tmp/");

    Ok(())
}

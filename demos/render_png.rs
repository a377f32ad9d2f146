use image::{ImageBuffer, Rgb};
use tanzaku::{
    Font, FontSystem, RenderConfig, TextContent,
    font_system::DEFAULT_FONT_SIZE,
    renderer::{BitmapCanvas, Framebuffer},
    style::Color,
    text::layout::DISPLAY_WIDTH,
};

#[allow(clippy::unwrap_used)]
fn main() {
    // 1. Setup Font System
    let font_system = FontSystem::new();
    font_system.load_system_fonts();
    if !font_system.bind_default_faces(DEFAULT_FONT_SIZE) {
        eprintln!("Some font classes have no face; their text will be invisible.");
    }

    // 2. Compose a confirmation screen
    let mut content = TextContent::new().with_header("Confirm sending");
    content.bold(["Send"]);
    content.normal(["0.001", "BTC", "to"]);
    content.br();
    content.mono(["bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq"]);
    content.br();
    content.br_half();
    content
        .format_parametrized(
            "Fee: {}\nTotal: {}",
            &["0.0001 BTC", "0.0011 BTC"],
            Font::Normal,
            Font::Bold,
        )
        .unwrap();

    let layout = font_system.layout(&content, &RenderConfig::default());
    println!(
        "lines={} runs={} truncated={}",
        layout.line_count(),
        layout.runs.len(),
        layout.is_truncated()
    );

    // 3. Render into the frame buffer
    let size = DISPLAY_WIDTH as usize;
    let mut framebuffer = Framebuffer::new(size, size, Color::BLACK);
    {
        let mut canvas = BitmapCanvas::new(&font_system, &mut framebuffer);
        layout.replay(&mut canvas);
    }

    // 4. Save Output
    let image: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_raw(size as u32, size as u32, framebuffer.to_rgb8()).unwrap();
    std::fs::create_dir_all("debug").expect("failed to create debug directory");
    let output_path = "debug/render_png.png";
    image.save(output_path).expect("failed to save image");

    println!("Saved debug image to: {}", output_path);
}

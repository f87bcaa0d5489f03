//! SDL preview: renders demo pages through the engine into an emulated
//! RGB565 panel and shows the result in a scaled window.

use rasterkit::{rgb565, Framebuffer, Gfx, PreviewConfig};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;

const CONFIG_PATH: &str = "preview.json";

/// 8x8 one-bit sprite used by the bitmap page.
const SPRITE: [u8; 8] = [0x3C, 0x7E, 0xDB, 0xFF, 0xBD, 0x99, 0x42, 0x3C];

/// Parse command line arguments over the loaded config, returning the
/// effective config and the vsync flag.
fn parse_args(mut config: PreviewConfig) -> (PreviewConfig, bool) {
    let args: Vec<String> = std::env::args().collect();
    let mut vsync = true;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--no-vsync" => vsync = false,
            "--width" | "-w" => {
                if i + 1 < args.len() {
                    if let Ok(w) = args[i + 1].parse::<i16>() {
                        config.width = w;
                    }
                    i += 1;
                }
            },
            "--height" | "-h" => {
                if i + 1 < args.len() {
                    if let Ok(h) = args[i + 1].parse::<i16>() {
                        config.height = h;
                    }
                    i += 1;
                }
            },
            "--scale" => {
                if i + 1 < args.len() {
                    if let Ok(s) = args[i + 1].parse::<u32>() {
                        config.scale = s;
                    }
                    i += 1;
                }
            },
            "--rotation" => {
                if i + 1 < args.len() {
                    if let Ok(r) = args[i + 1].parse::<u8>() {
                        config.rotation = r & 3;
                    }
                    i += 1;
                }
            },
            "--help" => {
                println!("Usage: rasterkit [OPTIONS]");
                println!();
                println!("Options:");
                println!("  --width W, -w W    Emulated panel width (default: 320)");
                println!("  --height H, -h H   Emulated panel height (default: 240)");
                println!("  --scale N          Integer window scale (default: 2)");
                println!("  --rotation N       Initial rotation 0-3 (default: 0)");
                println!("  --no-vsync         Disable VSync for uncapped framerate");
                println!("  --help             Show this help message");
                std::process::exit(0);
            },
            _ => {},
        }
        i += 1;
    }

    (config, vsync)
}

fn draw_shapes(gfx: &mut Gfx<Framebuffer>) {
    let (w, h) = (gfx.width(), gfx.height());
    gfx.fill_screen(rgb565(8, 16, 48));
    gfx.draw_rect(2, 2, w - 4, h - 4, rgb565(255, 255, 255));
    gfx.fill_rect(12, 16, 40, 28, rgb565(200, 40, 40));
    gfx.draw_round_rect(60, 16, 48, 28, 6, rgb565(255, 200, 0));
    gfx.fill_round_rect(116, 16, 48, 28, 8, rgb565(40, 180, 90));
    let cx = w / 2;
    gfx.draw_circle(cx - 40, h - 70, 24, rgb565(120, 200, 255));
    gfx.fill_circle(cx + 40, h - 70, 24, rgb565(255, 120, 200));
    gfx.draw_triangle(20, h - 12, 60, h - 50, 100, h - 12, rgb565(255, 255, 0));
    gfx.fill_triangle(w - 100, h - 12, w - 60, h - 50, w - 20, h - 12, rgb565(0, 220, 220));
}

fn draw_text_page(gfx: &mut Gfx<Framebuffer>) {
    gfx.fill_screen(0);
    gfx.set_text_wrap(true);
    gfx.set_text_size(1);
    gfx.set_text_color(rgb565(255, 255, 255));
    gfx.set_cursor(4, 16);
    gfx.write_str("Built-in 6x8 font, size 1\n");
    gfx.set_text_size(2);
    gfx.set_text_color(rgb565(255, 200, 0));
    gfx.write_str("Size 2\n");
    gfx.set_text_size_xy(1, 2);
    gfx.set_text_color_bg(rgb565(0, 0, 0), rgb565(0, 200, 120));
    gfx.write_str("Opaque background\n");
    gfx.set_text_size(1);
    gfx.set_text_color(rgb565(160, 160, 160));
    gfx.write_str("Wrapping: the quick brown fox jumps over the lazy dog again and again.");

    let msg = "measured";
    let base_y = gfx.height() - 24;
    let (bx, by, bw, bh) = gfx.text_bounds(msg, 8, base_y);
    gfx.set_cursor(8, base_y);
    gfx.set_text_color(rgb565(255, 255, 255));
    gfx.write_str(msg);
    gfx.draw_rect(bx - 2, by - 2, bw as i16 + 4, bh as i16 + 4, rgb565(255, 80, 80));
}

fn draw_bitmaps(gfx: &mut Gfx<Framebuffer>) {
    gfx.fill_screen(rgb565(16, 16, 16));
    gfx.draw_bitmap(20, 24, &SPRITE, 8, 8, rgb565(0, 255, 0));
    gfx.draw_bitmap_bg(40, 24, &SPRITE, 8, 8, rgb565(255, 255, 0), rgb565(80, 0, 80));

    let mut strip = [0u16; 128];
    for (i, px) in strip.iter_mut().enumerate() {
        let v = (i * 2) as u8;
        *px = rgb565(v, 0, 255 - v);
    }
    for row in 0..12 {
        gfx.draw_rgb_bitmap(20, 48 + row, &strip, 128, 1);
    }
}

fn draw_lines(gfx: &mut Gfx<Framebuffer>) {
    let (w, h) = (gfx.width(), gfx.height());
    gfx.fill_screen(0);
    let mut x = 0;
    while x < w {
        let t = (x % 255) as u8;
        gfx.draw_line(0, h - 1, x, 0, rgb565(255 - t, t, 200));
        x += 12;
    }
    let mut y = 0;
    while y < h {
        let t = (y % 255) as u8;
        gfx.draw_line(0, h - 1, w - 1, y, rgb565(t, 255 - t, 80));
        y += 12;
    }
    gfx.draw_fast_hline(0, h / 2, w, rgb565(255, 255, 255));
    gfx.draw_fast_vline(w / 2, 0, h, rgb565(255, 255, 255));
}

fn main() -> Result<(), String> {
    let loaded = PreviewConfig::load(CONFIG_PATH).unwrap_or_default();
    let (mut config, vsync) = parse_args(loaded);
    let scale = config.scale.max(1);

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let window = video_subsystem
        .window(
            "rasterkit preview",
            config.width as u32 * scale,
            config.height as u32 * scale,
        )
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas_builder = window.into_canvas().accelerated();
    if vsync {
        canvas_builder = canvas_builder.present_vsync();
    }
    let mut canvas = canvas_builder.build().map_err(|e| e.to_string())?;
    let texture_creator = canvas.texture_creator();
    let mut texture = texture_creator
        .create_texture_streaming(
            PixelFormatEnum::RGBA8888,
            config.width as u32,
            config.height as u32,
        )
        .map_err(|e| e.to_string())?;
    let mut event_pump = sdl_context.event_pump()?;

    let mut gfx = Gfx::new(
        Framebuffer::new(config.width, config.height),
        config.width,
        config.height,
    );
    gfx.set_rotation(config.rotation);

    let pages: [(&str, fn(&mut Gfx<Framebuffer>)); 4] = [
        ("Shapes", draw_shapes),
        ("Text", draw_text_page),
        ("Bitmaps", draw_bitmaps),
        ("Lines", draw_lines),
    ];
    let mut current = 0usize;

    println!("=== rasterkit preview ===");
    println!("Panel: {}x{} at {}x scale", config.width, config.height, scale);
    println!("Use --help for command line options.");
    println!("Controls:");
    println!("  1-4        - Select page");
    println!("  Left/Right - Cycle pages");
    println!("  R          - Cycle rotation");
    println!("  S          - Save config to {}", CONFIG_PATH);
    println!("  Escape     - Quit");

    'main: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'main,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match key {
                    Keycode::Escape => break 'main,
                    Keycode::Num1 => current = 0,
                    Keycode::Num2 => current = 1,
                    Keycode::Num3 => current = 2,
                    Keycode::Num4 => current = 3,
                    Keycode::Left => current = (current + pages.len() - 1) % pages.len(),
                    Keycode::Right => current = (current + 1) % pages.len(),
                    Keycode::R => {
                        gfx.set_rotation(gfx.rotation().wrapping_add(1));
                    },
                    Keycode::S => {
                        config.rotation = gfx.rotation();
                        if let Err(e) = config.save(CONFIG_PATH) {
                            eprintln!("Failed to save: {}", e);
                        } else {
                            println!("Config saved to {}", CONFIG_PATH);
                        }
                    },
                    _ => {},
                },
                _ => {},
            }
        }

        let (name, render) = pages[current];
        render(&mut gfx);

        // Page name overlay in the top-left corner.
        gfx.set_text_size(1);
        gfx.set_text_color_bg(rgb565(255, 255, 0), rgb565(0, 0, 0));
        gfx.set_cursor(4, 4);
        gfx.write_str(name);

        let pitch = gfx.driver().width() as usize * 4;
        texture
            .update(None, gfx.driver_mut().rgba_bytes(), pitch)
            .map_err(|e| e.to_string())?;
        canvas.copy(&texture, None, None)?;
        canvas.present();
    }

    Ok(())
}

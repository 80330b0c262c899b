// SPDX-License-Identifier: GPL-3.0-only

//! Terminal-based live preview
//!
//! Renders the camera feed to the terminal using Unicode half-block
//! characters for improved vertical resolution, with the selected filter
//! applied to every sampled pixel. Key bindings cover the whole capture
//! surface: filter cycling, photo capture and the record toggle.

use crate::backends::camera::CameraFrame;
use crate::config::Config;
use crate::errors::AppError;
use crate::filters::EffectDescriptor;
use crate::session::CaptureSession;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal, backend::CrosstermBackend, buffer::Buffer, layout::Rect, style::Color,
    widgets::Widget,
};
use std::io::{self, stdout};
use tracing::error;

/// Run the terminal preview
pub fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let session = CaptureSession::acquire(config);
    if !session.has_device() {
        // CaptureSession::acquire already printed the acquisition error
        return Err(Box::new(AppError::DeviceUnavailable(
            "cannot open preview without a camera".to_string(),
        )));
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, session, config.mirror_preview);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut session: CaptureSession,
    mirror: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let rt = tokio::runtime::Runtime::new()?;
    let mut status_message = build_status_message();

    loop {
        let frame = session.current_frame();
        let effect = session.selected_filter().descriptor();

        terminal.draw(|f| {
            let area = f.area();

            // Reserve bottom line for status
            let camera_area = Rect {
                x: area.x,
                y: area.y,
                width: area.width,
                height: area.height.saturating_sub(1),
            };

            let preview = PreviewWidget {
                frame: frame.as_ref(),
                effect,
                mirror,
            };
            f.render_widget(preview, camera_area);

            let status_area = Rect {
                x: area.x,
                y: area.height.saturating_sub(1),
                width: area.width,
                height: 1,
            };

            let rec = session.is_recording();
            let line = format!(
                "{}[{}] {}",
                if rec { "REC | " } else { "" },
                session.selected_filter(),
                status_message
            );
            f.render_widget(StatusBar { message: &line, recording: rec }, status_area);
        })?;

        // Handle input with timeout for frame updates
        if event::poll(crate::constants::timing::INPUT_POLL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            // Ctrl+C to quit
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                break;
            }

            match key.code {
                KeyCode::Right | KeyCode::Char('f') => {
                    session.cycle_filter_forward();
                }
                KeyCode::Left => {
                    session.cycle_filter_backward();
                }
                KeyCode::Char('p') => match rt.block_on(session.capture_photo()) {
                    Ok(path) => {
                        status_message = format!("Saved: {}", path.display());
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to capture photo");
                        status_message = format!("Error: {}", e);
                    }
                },
                KeyCode::Char('r') => {
                    if session.is_recording() {
                        match rt.block_on(session.stop_recording()) {
                            Ok(path) => {
                                status_message = format!("Saved: {}", path.display());
                            }
                            Err(e) => {
                                error!(error = %e, "Failed to stop recording");
                                status_message = format!("Error: {}", e);
                            }
                        }
                    } else {
                        match session.start_recording() {
                            Ok(()) => {
                                status_message = "Recording...".to_string();
                            }
                            Err(e) => {
                                error!(error = %e, "Failed to start recording");
                                status_message = format!("Error: {}", e);
                            }
                        }
                    }
                }
                KeyCode::Char('h') => {
                    status_message = build_help_message();
                }
                KeyCode::Char('q') => break,
                _ => {}
            }
        }
    }

    Ok(())
}

fn build_status_message() -> String {
    "'←'/'→' filter | 'p' photo | 'r' record | 'h' help | 'q' quit".to_string()
}

fn build_help_message() -> String {
    "←/→ or f: Cycle filter | p: Take photo | r: Start/stop recording | q/Ctrl+C: Quit".to_string()
}

/// Widget that renders a filtered camera frame using half-block characters
struct PreviewWidget<'a> {
    frame: Option<&'a CameraFrame>,
    effect: &'a EffectDescriptor,
    mirror: bool,
}

impl Widget for PreviewWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(frame) = self.frame else {
            // No frame yet - show placeholder
            let msg = "Waiting for camera...";
            let x = area.x + (area.width.saturating_sub(msg.len() as u16)) / 2;
            let y = area.y + area.height / 2;
            if y < area.y + area.height && x < area.x + area.width {
                buf.set_string(x, y, msg, ratatui::style::Style::default());
            }
            return;
        };
        if !frame.has_dimensions() || area.width == 0 || area.height == 0 {
            return;
        }

        // Calculate display dimensions maintaining aspect ratio.
        // Each terminal cell displays 2 vertical pixels using half-blocks.
        let frame_aspect = frame.width as f64 / frame.height as f64;
        let term_width = area.width as f64;
        let term_height = (area.height * 2) as f64;

        let (display_width, display_height) = if term_width / term_height > frame_aspect {
            let h = term_height;
            let w = h * frame_aspect;
            (w as u16, (h / 2.0) as u16)
        } else {
            let w = term_width;
            let h = w / frame_aspect;
            (w as u16, (h / 2.0) as u16)
        };

        // Center the image
        let x_offset = area.x + (area.width.saturating_sub(display_width)) / 2;
        let y_offset = area.y + (area.height.saturating_sub(display_height)) / 2;

        let x_scale = frame.width as f64 / display_width.max(1) as f64;
        let y_scale = frame.height as f64 / (display_height.max(1) * 2) as f64;

        for ty in 0..display_height {
            for tx in 0..display_width {
                let term_x = x_offset + tx;
                let term_y = y_offset + ty;

                if term_x >= area.x + area.width || term_y >= area.y + area.height {
                    continue;
                }

                let src_x = (tx as f64 * x_scale) as u32;
                let src_y_top = (ty as f64 * 2.0 * y_scale) as u32;
                let src_y_bottom = ((ty as f64 * 2.0 + 1.0) * y_scale) as u32;

                let src_x = if self.mirror {
                    frame.width.saturating_sub(1).saturating_sub(src_x)
                } else {
                    src_x
                };

                let top_color = sample_pixel(frame, self.effect, src_x, src_y_top);
                let bottom_color = sample_pixel(frame, self.effect, src_x, src_y_bottom);

                if let Some(cell) = buf.cell_mut((term_x, term_y)) {
                    cell.set_char('▀');
                    cell.set_fg(top_color);
                    cell.set_bg(bottom_color);
                }
            }
        }
    }
}

/// Sample one pixel through the active effect descriptor
///
/// The preview and the still capturer share the descriptor; the only
/// component skipped here is spatial blur, whose sub-pixel radius is below
/// half-block cell resolution.
fn sample_pixel(
    frame: &CameraFrame,
    effect: &EffectDescriptor,
    x: u32,
    y: u32,
) -> Color {
    let (r, g, b) = frame.rgb_at(x, y);
    let (r, g, b) = effect.shade_u8(r, g, b);
    Color::Rgb(r, g, b)
}

/// Status bar widget
struct StatusBar<'a> {
    message: &'a str,
    recording: bool,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bg = if self.recording {
            Color::Red
        } else {
            Color::DarkGray
        };

        // Fill background
        for x in area.x..area.x + area.width {
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_char(' ');
                cell.set_bg(bg);
            }
        }

        // Truncate on char boundaries (the bindings include arrow glyphs)
        let text: String = self.message.chars().take(area.width as usize).collect();

        buf.set_string(
            area.x,
            area.y,
            &text,
            ratatui::style::Style::default().fg(Color::White).bg(bg),
        );
    }
}

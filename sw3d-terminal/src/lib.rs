/// Terminal frontend for the SW3D demo steps
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use sw3d_core::{Scene, StepKind};
use tracing::{debug, error};

pub mod color;
pub mod config;
pub mod renderer;

pub use renderer::TerminalSurface;

/// Degrees turned per rotation key press.
const ROTATION_STEP: f64 = 5.0;

/// Rows reserved at the top for the status line.
const STATUS_ROWS: u16 = 1;

/// A key press translated to a scene action
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Quit,
    SelectStep(StepKind),
    Rotate { horizontal: f64, vertical: f64 },
    Detail(i32),
    ToggleFill,
    CycleLines,
    TogglePoints,
    ToggleNumbers,
}

impl Command {
    pub fn from_key(code: KeyCode) -> Option<Self> {
        let command = match code {
            KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
            KeyCode::Char(c @ '1'..='9') => {
                Command::SelectStep(StepKind::from_number(c as usize - '0' as usize)?)
            }
            KeyCode::Char('w') | KeyCode::Up => Command::Rotate {
                horizontal: 0.0,
                vertical: ROTATION_STEP,
            },
            KeyCode::Char('s') | KeyCode::Down => Command::Rotate {
                horizontal: 0.0,
                vertical: -ROTATION_STEP,
            },
            KeyCode::Char('a') | KeyCode::Left => Command::Rotate {
                horizontal: -ROTATION_STEP,
                vertical: 0.0,
            },
            KeyCode::Char('d') | KeyCode::Right => Command::Rotate {
                horizontal: ROTATION_STEP,
                vertical: 0.0,
            },
            KeyCode::Char('+') | KeyCode::Char('=') => Command::Detail(1),
            KeyCode::Char('-') => Command::Detail(-1),
            KeyCode::Char('f') => Command::ToggleFill,
            KeyCode::Char('l') => Command::CycleLines,
            KeyCode::Char('p') => Command::TogglePoints,
            KeyCode::Char('n') => Command::ToggleNumbers,
            _ => return None,
        };
        Some(command)
    }
}

/// Main application struct for terminal rendering
pub struct TerminalApp {
    scene: Scene,
    surface: TerminalSurface,
    target_fps: u32,
    running: bool,
    last_frame: Instant,
    last_fps_sample: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(scene: Scene, target_fps: u32) -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        let now = Instant::now();

        Ok(Self {
            scene,
            surface: TerminalSurface::new(columns as usize, rows.saturating_sub(STATUS_ROWS) as usize),
            target_fps: target_fps.max(1),
            running: true,
            last_frame: now,
            last_fps_sample: now,
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_secs(1) / self.target_fps;
        self.last_frame = Instant::now();

        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::ZERO)? {
                self.handle_event(event::read()?)?;
            }

            let dt = frame_start.duration_since(self.last_frame).as_secs_f64() * 1000.0;
            self.last_frame = frame_start;
            self.render(dt)?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_fps_sample).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_fps_sample).as_secs_f32();
                self.frame_count = 0;
                self.last_fps_sample = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            }) => {
                if let Some(command) = Command::from_key(code) {
                    self.apply(command);
                }
            }
            Event::Resize(columns, rows) => {
                debug!(columns, rows, "terminal resized");
                self.surface
                    .resize(columns as usize, rows.saturating_sub(STATUS_ROWS) as usize);
                execute!(stdout(), terminal::Clear(ClearType::All))?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Apply one command to the scene.
    pub fn apply(&mut self, command: Command) {
        debug!(?command, "input");
        match command {
            Command::Quit => self.running = false,
            Command::SelectStep(step) => self.scene.set_step(step),
            Command::Rotate {
                horizontal,
                vertical,
            } => self.scene.rotate(horizontal, vertical),
            Command::Detail(delta) => self.scene.adjust_detail(delta),
            Command::ToggleFill => self.scene.toggle_fill(),
            Command::CycleLines => self.scene.cycle_line_width(),
            Command::TogglePoints => self.scene.toggle_points(),
            Command::ToggleNumbers => self.scene.toggle_vertex_numbers(),
        }
    }

    fn render(&mut self, dt: f64) -> io::Result<()> {
        self.surface.clear();

        // A bad frame is logged and skipped; the loop keeps running.
        if let Err(err) = self.scene.render(dt, &mut self.surface) {
            error!(%err, step = %self.scene.step(), "frame failed");
        }

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        // Status line above the picture
        let step = self.scene.step();
        let mut status = format!(
            "SW3D {}/{} {} | FPS: {:.1}",
            step.number(),
            StepKind::ALL.len(),
            step.message(),
            self.fps
        );
        if let Some((vertices, triangles)) = self.scene.mesh_stats() {
            status.push_str(&format!(" | {vertices} points, {triangles} triangles"));
        }
        status.push_str(" | 1-7 step, WASD rotate, +/- detail, f/l/p/n display, q quit");
        let status: String = status.chars().take(self.surface.columns()).collect();

        queue!(
            stdout,
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(status),
            ResetColor
        )?;

        self.surface.draw(&mut stdout, STATUS_ROWS)?;

        stdout.flush()?;
        Ok(())
    }
}

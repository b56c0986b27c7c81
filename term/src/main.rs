use std::io::{self, Write};

use game_loop::game_loop;
use termion::{clear, color};
use termion::cursor::{Goto, Hide, Show};
use termion::event::{Event, Key};
use termion::input::TermRead;
use termion::raw::{IntoRawMode, RawTerminal};
use termion::screen::{ToAlternateScreen, ToMainScreen};

use arcade_base::base::{Direction, GameMode, Matrix, Point};
use arcade_base::config::{DEFAULT_MAZE, SnakeConfig};
use arcade_base::score::MemoryScores;
use arcade_base::session::{Input, PacmanSession, Session, SnakeSession};

const USAGE: &str = "Usage: arcade-term (pacman|snake)? (--seed $SEED)?";
const UPDATES_PER_SECOND: u32 = 8;

// Leaves room for the score line, which can outgrow a narrow maze.
const MIN_WIDTH: i32 = 32;

type Color = (u8, u8, u8);

struct Screen {
    extent: Point,
    offset: Point,
    output: RawTerminal<io::Stdout>,
    next: Matrix<char>,
    prev: Matrix<char>,
    fg: Option<Color>,
}

impl Screen {
    fn new(size: Point) -> io::Result<Self> {
        let prev = Matrix::new(size, ' ');
        let next = Matrix::new(size, ' ');
        let (x, y) = termion::terminal_size()?;
        let output = io::stdout().into_raw_mode()?;
        let extent = Point(x as i32, y as i32);
        let offset = Point((extent - size).0 / 2 + 1, (extent - size).1 / 2 + 1);
        Ok(Self { extent, offset, output, next, prev, fg: None })
    }

    fn load(&mut self, frame: &str) {
        self.next.fill(' ');
        for (y, line) in frame.lines().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                self.next.set(Point(x as i32, y as i32), ch);
            }
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let mut lines_changed = 0;
        let Point(sx, sy) = self.next.size;
        for y in 0..sy {
            let mut start = sx;
            let mut limit = 0;
            for x in 0..sx {
                let next = self.next.get(Point(x, y));
                let prev = self.prev.get(Point(x, y));
                if next == prev { continue; }
                start = std::cmp::min(start, x);
                limit = std::cmp::max(limit, x);
            }
            if start > limit { continue; }

            lines_changed += 1;
            let mx = (self.offset.0 + start) as u16;
            let my = (self.offset.1 + y) as u16;
            write!(self.output, "{}", Goto(mx, my))?;

            for x in start..=limit {
                let ch = self.next.get(Point(x, y));
                self.set_foreground(glyph_color(ch))?;
                write!(self.output, "{}", ch)?;
            }
        }
        std::mem::swap(&mut self.next, &mut self.prev);

        if lines_changed > 0 { self.output.flush() } else { Ok(()) }
    }

    fn enter_alt_screen(&mut self) -> io::Result<()> {
        write!(self.output, "{}{}{}", ToAlternateScreen, Hide, clear::All)?;
        self.clear_foreground()?;
        self.output.flush()
    }

    fn exit_alt_screen(&mut self) -> io::Result<()> {
        self.clear_foreground()?;
        write!(self.output, "{}{}", ToMainScreen, Show)?;
        self.output.flush()
    }

    fn clear_foreground(&mut self) -> io::Result<()> {
        self.fg = None;
        write!(self.output, "{}", color::Fg(color::Reset))
    }

    fn set_foreground(&mut self, color: Color) -> io::Result<()> {
        if self.fg == Some(color) { return Ok(()); }
        self.fg = Some(color);
        let (r, g, b) = color;
        write!(self.output, "{}", color::Fg(color::Rgb(r, g, b)))
    }

    fn write_status_message(&mut self, msg: &str) -> io::Result<()> {
        self.clear_foreground()?;
        let x = std::cmp::max(self.extent.0 - msg.len() as i32, 1) as u16;
        let y = self.extent.1 as u16;
        write!(self.output, "{}{}{}", Goto(x, y), clear::CurrentLine, msg)?;
        self.output.flush()
    }
}

fn glyph_color(ch: char) -> Color {
    match ch {
        '#' => (0x33, 0x55, 0xff),
        'C' => (0xff, 0xee, 0x00),
        'M' | '*' => (0xff, 0x44, 0x44),
        '@' => (0x66, 0xff, 0x66),
        'o' => (0x33, 0xcc, 0x33),
        '.' => (0x88, 0x88, 0x88),
        _ => (0xee, 0xee, 0xee),
    }
}

fn frame_size(frame: &str) -> Point {
    let width = frame.lines().map(|x| x.chars().count()).max().unwrap_or(0) as i32;
    Point(std::cmp::max(width, MIN_WIDTH), frame.lines().count() as i32)
}

fn key_input(key: Key) -> Option<Input> {
    match key {
        Key::Up => Some(Input::Steer(Direction::Up)),
        Key::Down => Some(Input::Steer(Direction::Down)),
        Key::Left => Some(Input::Steer(Direction::Left)),
        Key::Right => Some(Input::Steer(Direction::Right)),
        Key::Char(ch) => Input::from_char(ch),
        _ => None,
    }
}

fn status(mode: GameMode) -> String {
    format!("Mode: {:?} / arrows or wasd: steer / t: AI / p: pause / r: reset / q: quit", mode)
}

fn main() -> io::Result<()> {
    let args: Vec<_> = std::env::args().collect();
    let (name, rest) = match args.get(1).map(|x| x.as_str()) {
        Some(x @ ("pacman" | "snake")) => (x, &args[2..]),
        _ => ("pacman", &args[1..]),
    };
    let seed = match rest {
        [] => None,
        [flag, seed] if flag == "--seed" => match seed.parse::<u64>() {
            Ok(x) => Some(x),
            Err(_) => panic!("{}", USAGE),
        },
        _ => panic!("{}", USAGE),
    };

    let session: Box<dyn Session> = if name == "snake" {
        let scores = Box::new(MemoryScores::default());
        Box::new(SnakeSession::new(SnakeConfig::default(), scores, seed))
    } else {
        Box::new(PacmanSession::new(DEFAULT_MAZE.clone(), seed))
    };

    let frame = session.render();
    let mut events = termion::async_stdin().events();
    let mut screen = Screen::new(frame_size(&frame))?;
    screen.enter_alt_screen()?;
    screen.load(&frame);
    screen.render()?;

    let mut mode = session.mode();
    screen.write_status_message(&status(mode))?;

    game_loop(session, UPDATES_PER_SECOND, 0.1, |g| {
        while let Some(Ok(e)) = events.next() {
            match e {
                Event::Key(Key::Ctrl('c') | Key::Char('q')) => g.exit(),
                Event::Key(key) => if let Some(x) = key_input(key) { g.game.handle(x); },
                _ => {}
            }
        }
        g.game.update();

        // Frames only change on update, so rendering is locked to ticks.
        screen.load(&g.game.render());
        let mut result = screen.render();
        if g.game.mode() != mode {
            mode = g.game.mode();
            result = result.and_then(|_| screen.write_status_message(&status(mode)));
        }
        if result.is_err() { g.exit(); }
    }, |_| {
        std::thread::sleep(std::time::Duration::from_micros(1000));
    });

    screen.exit_alt_screen()?;
    screen.output.suspend_raw_mode()
}

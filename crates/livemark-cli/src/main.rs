mod notes;
mod render;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use livemark_config::Config;
use livemark_engine::{DisplayMode, Editor, EditorOptions, Theme};
use notes::LinkTarget;
use ratatui::{
    Frame, Terminal,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use render::{Palette, render_document};
use std::{
    env, fs,
    io::stdout,
    path::{Path, PathBuf},
    process,
};

const USAGE: &str = "Usage: livemark [--mode source|live-preview|reading] [--theme light|dark] <file.md>";

#[derive(Debug, PartialEq)]
struct Args {
    file: PathBuf,
    mode: Option<DisplayMode>,
    theme: Option<Theme>,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut file = None;
    let mut mode = None;
    let mut theme = None;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--mode" => {
                let value = args.next().context("--mode needs a value")?;
                mode = Some(value.parse()?);
            }
            "--theme" => {
                let value = args.next().context("--theme needs a value")?;
                theme = Some(value.parse()?);
            }
            flag if flag.starts_with("--") => anyhow::bail!("Unknown option '{flag}'"),
            path if file.is_none() => file = Some(PathBuf::from(path)),
            extra => anyhow::bail!("Unexpected argument '{extra}'"),
        }
    }

    Ok(Args {
        file: file.context("No file given")?,
        mode,
        theme,
    })
}

struct App {
    path: PathBuf,
    notes_root: PathBuf,
    editor: Editor,
    saved_version: u64,
    /// Written back to `config_path` when the mode changes.
    config: Config,
    config_path: Option<PathBuf>,
    status: Option<String>,
    scroll: u16,
}

fn load_editor(path: &Path, options: EditorOptions) -> Result<Editor> {
    let content = if path.exists() {
        notes::read_file(path)?
    } else {
        String::new()
    };
    let mut editor = Editor::new(&content, options);
    editor.on_wikilink(|target: &str| log::info!("Activated wikilink '{target}'"));
    Ok(editor)
}

impl App {
    fn open(path: PathBuf, notes_root: PathBuf, options: EditorOptions) -> Result<Self> {
        let editor = load_editor(&path, options)?;
        Ok(Self {
            path,
            notes_root,
            saved_version: editor.version(),
            editor,
            config: Config::default(),
            config_path: None,
            status: None,
            scroll: 0,
        })
    }

    fn with_config(mut self, config: Config, config_path: PathBuf) -> Self {
        self.config = config;
        self.config_path = Some(config_path);
        self
    }

    /// Replaces the open buffer, keeping theme and mode.
    fn switch_to(&mut self, path: PathBuf) -> Result<()> {
        let options = EditorOptions {
            theme: self.editor.theme(),
            mode: self.editor.mode(),
        };
        self.editor = load_editor(&path, options)?;
        self.saved_version = self.editor.version();
        self.path = path;
        self.scroll = 0;
        Ok(())
    }

    fn persist_mode(&mut self, mode: DisplayMode) {
        self.config.mode = mode;
        if let Some(path) = &self.config_path
            && let Err(e) = self.config.save_to_path(path)
        {
            log::warn!("Failed to save mode to {}: {e:#}", path.display());
        }
    }

    fn is_dirty(&self) -> bool {
        self.editor.version() != self.saved_version
    }

    /// Handles one key press; returns `true` when the app should quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let result = match key.code {
            KeyCode::Esc => return true,
            KeyCode::Char('q') if ctrl => return true,
            KeyCode::Char('e') if ctrl => {
                let mode = self.editor.cycle_mode();
                self.persist_mode(mode);
                self.status = Some(format!("Mode: {}", mode.label()));
                Ok(())
            }
            KeyCode::Char('s') if ctrl => self.save(),
            KeyCode::Char('o') if ctrl => self.follow_wikilink(),
            KeyCode::Char(c) if !ctrl => self.insert(&c.to_string()),
            KeyCode::Enter => self.insert("\n"),
            KeyCode::Tab => self.insert("\t"),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete_forward(),
            KeyCode::Left => {
                let prev = prev_boundary(&self.editor.content(), self.editor.cursor());
                self.editor.set_cursor(prev);
                Ok(())
            }
            KeyCode::Right => {
                let next = next_boundary(&self.editor.content(), self.editor.cursor());
                self.editor.set_cursor(next);
                Ok(())
            }
            KeyCode::Up => {
                self.move_vertical(-1);
                Ok(())
            }
            KeyCode::Down => {
                self.move_vertical(1);
                Ok(())
            }
            KeyCode::Home => {
                let text = self.editor.content();
                let (start, _) = line_bounds(&text, self.editor.cursor());
                self.editor.set_cursor(start);
                Ok(())
            }
            KeyCode::End => {
                let text = self.editor.content();
                let (_, end) = line_bounds(&text, self.editor.cursor());
                self.editor.set_cursor(end);
                Ok(())
            }
            _ => Ok(()),
        };

        if let Err(e) = result {
            log::warn!("{e:#}");
            self.status = Some(format!("Error: {e}"));
        }
        false
    }

    fn insert(&mut self, text: &str) -> Result<()> {
        let at = self.editor.cursor();
        self.editor.insert(at, text)?;
        self.editor.set_cursor(at + text.len());
        Ok(())
    }

    fn backspace(&mut self) -> Result<()> {
        let end = self.editor.cursor();
        let start = prev_boundary(&self.editor.content(), end);
        if start < end {
            self.editor.delete(start..end)?;
            self.editor.set_cursor(start);
        }
        Ok(())
    }

    fn delete_forward(&mut self) -> Result<()> {
        let start = self.editor.cursor();
        let end = next_boundary(&self.editor.content(), start);
        if start < end {
            self.editor.delete(start..end)?;
            self.editor.set_cursor(start);
        }
        Ok(())
    }

    fn move_vertical(&mut self, delta: isize) {
        let text = self.editor.content();
        let cursor = self.editor.cursor();
        let (start, _) = line_bounds(&text, cursor);
        let column = text[start..cursor].chars().count();

        let target_start = if delta < 0 {
            if start == 0 {
                return;
            }
            line_bounds(&text, start - 1).0
        } else {
            match text[cursor..].find('\n') {
                Some(i) => cursor + i + 1,
                None => return,
            }
        };
        let (_, target_end) = line_bounds(&text, target_start);
        let offset = text[target_start..target_end]
            .char_indices()
            .nth(column)
            .map_or(target_end, |(i, _)| target_start + i);
        self.editor.set_cursor(offset);
    }

    fn save(&mut self) -> Result<()> {
        notes::write_file(&self.path, &self.editor.content())
            .with_context(|| format!("Failed to save {}", self.path.display()))?;
        self.saved_version = self.editor.version();
        self.status = Some(format!("Saved {}", self.path.display()));
        log::info!("Saved {}", self.path.display());
        Ok(())
    }

    fn follow_wikilink(&mut self) -> Result<()> {
        let Some(target) = self.editor.activate_at(self.editor.cursor()) else {
            self.status = Some("No wikilink under cursor".to_string());
            return Ok(());
        };
        if self.is_dirty() {
            self.status = Some("Unsaved changes; Ctrl-S before following links".to_string());
            return Ok(());
        }

        let (path, message) = match notes::resolve_target(&self.notes_root, &target)? {
            LinkTarget::Existing(path) => {
                let message = format!("Opened {}", path.display());
                (path, message)
            }
            LinkTarget::New(path) => {
                notes::create_note(&path, &target)?;
                log::info!("Created {}", path.display());
                let message = format!("Created {}", path.display());
                (path, message)
            }
        };

        self.switch_to(path)?;
        self.status = Some(message);
        Ok(())
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

fn line_bounds(text: &str, offset: usize) -> (usize, usize) {
    let start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
    let end = text[offset..].find('\n').map_or(text.len(), |i| offset + i);
    let end = if text[start..end].ends_with('\r') {
        end - 1
    } else {
        end
    };
    (start, end)
}

fn prev_boundary(text: &str, offset: usize) -> usize {
    let prev = text[..offset].chars().next_back().map_or(0, |c| offset - c.len_utf8());
    if text[..prev].ends_with('\r') && text[prev..].starts_with('\n') {
        prev - 1
    } else {
        prev
    }
}

fn next_boundary(text: &str, offset: usize) -> usize {
    if text[offset..].starts_with("\r\n") {
        return offset + 2;
    }
    text[offset..].chars().next().map_or(offset, |c| offset + c.len_utf8())
}

fn init_logging() -> Result<()> {
    let log_path = env::temp_dir().join("livemark.log");
    let file = fs::File::create(&log_path)
        .with_context(|| format!("Failed to create log file {}", log_path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn notes_root_for(config: &Config, file: &Path) -> PathBuf {
    if let Some(dir) = &config.notes_dir {
        return dir.clone();
    }
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn main() -> Result<()> {
    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    init_logging()?;

    let config = match Config::load() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    let mut options = config.editor_options();
    if let Some(mode) = args.mode {
        options.mode = mode;
    }
    if let Some(theme) = args.theme {
        options.theme = theme;
    }

    let notes_root = notes_root_for(&config, &args.file);
    log::info!(
        "livemark starting on {} (notes in {})",
        args.file.display(),
        notes_root.display()
    );
    let mut app =
        App::open(args.file, notes_root, options)?.with_config(config, Config::config_path());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && app.handle_key(key)
        {
            return Ok(());
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    let palette = Palette::for_theme(app.editor.theme());
    let rendered = render_document(
        &app.editor.content(),
        app.editor.decorations(),
        app.editor.cursor(),
        &palette,
    );

    let cursor = rendered
        .iter()
        .enumerate()
        .find_map(|(row, line)| line.cursor_col.map(|col| (row as u16, col)));

    // Keep the cursor row inside the bordered viewport.
    let height = chunks[0].height.saturating_sub(2);
    if let Some((row, _)) = cursor
        && height > 0
    {
        if row < app.scroll {
            app.scroll = row;
        } else if row >= app.scroll + height {
            app.scroll = row + 1 - height;
        }
    }

    let title = format!(
        " {}{} ",
        app.file_name(),
        if app.is_dirty() { " [+]" } else { "" }
    );
    let content = Paragraph::new(rendered.into_iter().map(|l| l.line).collect::<Vec<_>>())
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(palette.text))
        .scroll((app.scroll, 0));
    f.render_widget(content, chunks[0]);

    if let Some((row, col)) = cursor {
        let x = chunks[0].x + 1 + col;
        let y = chunks[0].y + 1 + row - app.scroll;
        if x < chunks[0].right().saturating_sub(1) && y < chunks[0].bottom().saturating_sub(1) {
            f.set_cursor_position((x, y));
        }
    }

    let line_label = app
        .editor
        .cursor_line()
        .map_or_else(String::new, |n| format!(" | Ln {}", n + 1));
    let status = Line::from(vec![
        Span::styled(
            format!(" {} ", app.editor.mode().label()),
            Style::default()
                .bg(palette.accent)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " {}{}{} | ^E mode ^S save ^O follow link Esc quit",
            app.path.display(),
            if app.is_dirty() { " [+]" } else { "" },
            line_label,
        )),
        Span::styled(
            app.status
                .as_deref()
                .map_or_else(String::new, |s| format!(" | {s}")),
            Style::default().fg(palette.muted),
        ),
    ]);
    f.render_widget(Paragraph::new(status), chunks[1]);
}

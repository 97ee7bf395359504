//! `modalui` demo: a trading-post menu that opens each kind of dialog.
//!
//! Keys: `m` shows a message, `y` asks a yes/no question, `t` prompts for a
//! ship name, `q` or Escape leaves. Ctrl+C quits from anywhere.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use crossterm::event::KeyCode;
use log::info;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Paragraph, Widget},
};

use modalui::{
    Category, DEFAULT_PRIORITY, Dialog, DialogContent, DialogError, DialogOptions, Flow, Handler,
    KeyId, LabelCatalog, Message, Placement, TextEntry, Ui, YesNo, ui::default_catalog,
};

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];
const HISTORY_LINES: usize = 8;

#[derive(Debug, Parser)]
#[command(
    name = "modalui",
    version,
    about = "Interactive demo of modal terminal dialogs"
)]
struct Cli {
    /// Frames (and ticks) per second
    #[arg(long = "fps", value_name = "N", default_value_t = 30)]
    fps: u32,

    /// JSON button label overrides, e.g. [{"id": "yes", "text": "AYE", "hotkey": "a"}]
    #[arg(short = 'l', long = "labels", value_name = "FILE")]
    labels: Option<PathBuf>,

    /// Write debug logs to this file
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Leave the mouse to the terminal instead of capturing clicks
    #[arg(long = "no-mouse")]
    no_mouse: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if let Some(path) = cli.log_file.as_deref() {
        init_logging(path)?;
    }
    let options = build_options(&cli)?;

    let mut ui = Ui::terminal(options).map_err(|err| eyre!("{err:#}"))?;
    let mut menu = TradingPost::dialog();
    match menu.show(&mut ui) {
        Ok(_) => {}
        Err(err) if DialogError::is_quit(&err) => info!("quit requested"),
        Err(err) => return Err(eyre!("{err:#}")),
    }
    info!("visited {} dialogs", menu.content().history.len());
    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .wrap_err("failed to install logger")?;
    Ok(())
}

fn build_options(cli: &Cli) -> Result<DialogOptions> {
    if cli.fps == 0 {
        return Err(eyre!("--fps must be at least 1"));
    }
    let mut options = DialogOptions::default()
        .with_fps(cli.fps)
        .with_mouse_capture(!cli.no_mouse);
    if let Some(path) = cli.labels.as_deref() {
        options = options.with_labels(load_labels(path)?);
    }
    Ok(options)
}

fn load_labels(path: &Path) -> Result<LabelCatalog> {
    let source = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read labels from {}", path.display()))?;
    let overrides = LabelCatalog::from_json_str(&source)
        .map_err(|err| eyre!("{}: {err:#}", path.display()))?;
    Ok((*default_catalog()).clone().merged(overrides))
}

/// Top-level demo dialog.
#[derive(Debug, Default)]
struct TradingPost {
    history: Vec<String>,
    ship_name: String,
    ticks: usize,
}

impl TradingPost {
    fn dialog() -> Dialog<Self> {
        let mut dialog = Dialog::new(None, TradingPost::default()).with_placement(Placement::full());
        dialog.add_handler_default(
            Category::Tick,
            Handler::new(|dialog: &mut Dialog<Self>, _, _| {
                dialog.content_mut().ticks += 1;
                Ok(Flow::Continue)
            }),
        );
        dialog.add_key_handler(
            KeyId::Char('m'),
            Handler::new(|dialog: &mut Dialog<Self>, ui: &mut Ui, _| {
                let mut message = Message::dialog(Some(dialog.id()), "Your cargo hold is full.");
                dialog.show_child(ui, &mut message)?;
                dialog.content_mut().record("message closed".to_string());
                Ok(Flow::Handled)
            }),
            DEFAULT_PRIORITY,
        );
        dialog.add_key_handler(
            KeyId::Char('y'),
            Handler::new(|dialog: &mut Dialog<Self>, ui: &mut Ui, _| {
                let mut question =
                    YesNo::dialog(Some(dialog.id()), "Sell 40 tons of ore for 1200 credits?");
                let answer = dialog.show_child(ui, &mut question)?;
                let entry = match answer {
                    Some(true) => "sold the ore",
                    Some(false) => "kept the ore",
                    None => "no answer",
                };
                dialog.content_mut().record(entry.to_string());
                Ok(Flow::Handled)
            }),
            DEFAULT_PRIORITY,
        );
        dialog.add_key_handler(
            KeyId::Char('t'),
            Handler::new(|dialog: &mut Dialog<Self>, ui: &mut Ui, _| {
                let mut prompt = TextEntry::dialog(Some(dialog.id()), "Name your ship:");
                prompt.set_default_text(dialog.content().ship_name.clone());
                let name = dialog.show_child(ui, &mut prompt)?.unwrap_or_default();
                let content = dialog.content_mut();
                if name.is_empty() {
                    content.record("renaming cancelled".to_string());
                } else {
                    content.record(format!("ship renamed to {name}"));
                    content.ship_name = name;
                }
                Ok(Flow::Handled)
            }),
            DEFAULT_PRIORITY,
        );
        let leave = Handler::new(|_: &mut Dialog<Self>, _, _| Ok(Flow::Exit(None)));
        dialog.add_key_handler_default(KeyId::Char('q'), leave.clone());
        dialog.add_key_handler_default(KeyId::Code(KeyCode::Esc), leave);
        dialog
    }

    fn record(&mut self, entry: String) {
        info!("{entry}");
        self.history.push(entry);
    }
}

impl DialogContent for TradingPost {
    type Output = ();

    fn render(&self, area: Rect, buf: &mut Buffer) {
        let spinner = SPINNER[(self.ticks / 5) % SPINNER.len()];
        let ship = if self.ship_name.is_empty() {
            "(unnamed)"
        } else {
            self.ship_name.as_str()
        };
        let mut lines = vec![
            Line::from(format!("Ship: {ship}  {spinner}")),
            Line::from(""),
            Line::from("[m] message   [y] sell ore   [t] rename ship   [q] leave"),
            Line::from(""),
        ];
        let skip = self.history.len().saturating_sub(HISTORY_LINES);
        lines.extend(
            self.history[skip..]
                .iter()
                .map(|entry| Line::from(format!("- {entry}"))),
        );
        Paragraph::new(lines)
            .style(Style::new().fg(Color::Gray))
            .block(Block::bordered().title(" Trading post "))
            .render(area, buf);
    }
}

//! UI rendering using ratatui
//!
//! Screens:
//! - ThemeSelect: pick a skin
//! - Wizard: match configuration
//! - Playing: board, round result, champion
//!
//! Dialogs are drawn last, centered over whatever screen is active.

use crate::app::{App, AppCoordinator, Dialog, Feedback, Field, Screen, Stage, Wizard};
use crate::game::controller::{MatchController, RoundReport, Team};
use crate::game::round::{Cell, RoundEngine, RoundOutcome};
use crate::game::dictionary::WordStore;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use super::gallows::ArtCache;
use super::theme::{hex_color, Palette, Theme};

const LOGO: &str = r#"
 _   _    _    _   _  ____ __  __    _    _   _
| | | |  / \  | \ | |/ ___|  \/  |  / \  | \ | |
| |_| | / _ \ |  \| | |  _| |\/| | / _ \ |  \| |
|  _  |/ ___ \| |\  | |_| | |  | |/ ___ \| |\  |
|_| |_/_/   \_\_| \_|\____|_|  |_/_/   \_\_| \_|
"#;

const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Render the appropriate screen based on app state
pub fn render(frame: &mut Frame, coordinator: &AppCoordinator) {
    let palette = coordinator.theme.palette();
    match &coordinator.screen {
        Screen::ThemeSelect => render_theme_select(frame, coordinator.theme),
        Screen::Wizard => {
            render_wizard(frame, &palette, &coordinator.wizard, coordinator.store());
        }
        Screen::Playing(app) => render_game(frame, &palette, app, &coordinator.art),
    }

    if let Some(dialog) = &coordinator.dialog {
        render_dialog(frame, &palette, dialog);
    }
}

/// Render the theme picker, previewing each theme in its own colours
fn render_theme_select(frame: &mut Frame, selected: Theme) {
    let area = frame.area();
    let palette = selected.palette();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Logo
            Constraint::Length(2), // Prompt
            Constraint::Min(8),    // Themes
            Constraint::Length(2), // Footer
        ])
        .margin(2)
        .split(area);

    let logo = Paragraph::new(LOGO)
        .style(palette.title())
        .alignment(Alignment::Center);
    frame.render_widget(logo, layout[0]);

    let prompt = Paragraph::new("Choose a theme")
        .style(palette.text())
        .alignment(Alignment::Center);
    frame.render_widget(prompt, layout[1]);

    let items: Vec<ListItem> = Theme::ALL
        .iter()
        .map(|theme| {
            let own = theme.palette();
            let (prefix, style) = if *theme == selected {
                ("> ", own.selected())
            } else {
                ("  ", Style::default().fg(own.accent))
            };
            ListItem::new(format!("{}{:<10} {}", prefix, theme.name(), theme.tagline()))
                .style(style)
        })
        .collect();
    frame.render_widget(List::new(items), centered_columns(layout[2], 48));

    let footer = Paragraph::new("↑↓ Choose  Enter Continue  Esc Quit")
        .style(palette.muted())
        .alignment(Alignment::Center);
    frame.render_widget(footer, layout[3]);
}

/// Render the match wizard
fn render_wizard(frame: &mut Frame, palette: &Palette, wizard: &Wizard, store: Option<&WordStore>) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Fields
            Constraint::Length(2), // Footer
        ])
        .margin(1)
        .split(area);

    let header = Paragraph::new("NEW MATCH")
        .style(palette.title())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(palette.border()),
        );
    frame.render_widget(header, layout[0]);

    let focused = wizard.focused();
    let items: Vec<ListItem> = wizard
        .fields()
        .into_iter()
        .map(|field| {
            let line = field_line(palette, wizard, store, field, field == focused);
            ListItem::new(line)
        })
        .collect();
    frame.render_widget(List::new(items), centered_columns(layout[1], 56));

    let footer_text = match focused {
        Field::Team(_) => "Type name  ←→ Colour  Del Remove  ↑↓ Move  Esc Quit",
        Field::AddTeam | Field::Start => "Enter Select  ↑↓ Move  Ctrl+R Reset  F5 Reload words  Esc Quit",
        _ => "←→ Change  ↑↓ Move  Ctrl+R Reset  F5 Reload words  Esc Quit",
    };
    let footer = Paragraph::new(footer_text)
        .style(palette.muted())
        .alignment(Alignment::Center);
    frame.render_widget(footer, layout[2]);
}

/// One wizard row
fn field_line<'a>(
    palette: &Palette,
    wizard: &'a Wizard,
    store: Option<&'a WordStore>,
    field: Field,
    focused: bool,
) -> Line<'a> {
    let marker = if focused { "> " } else { "  " };
    let label_style = if focused {
        palette.selected()
    } else {
        palette.text()
    };

    let setting = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{}{:<16}", marker, label), label_style),
            Span::styled(format!("◀ {} ▶", value), palette.warn()),
        ])
    };

    match field {
        Field::Mode => setting("Mode", wizard.mode.label().to_string()),
        Field::Difficulty => setting(
            "Difficulty",
            format!(
                "{} ({} attempts)",
                wizard.difficulty.label(),
                wizard.difficulty.max_attempts()
            ),
        ),
        Field::Words => {
            let value = match store {
                Some(store) => format!(
                    "{} ({} words)",
                    wizard.words.label(),
                    store.pool_size(wizard.difficulty, wizard.words)
                ),
                None => wizard.words.label().to_string(),
            };
            setting("Words", value)
        }
        Field::Rounds => setting("Rounds to win", wizard.rounds_to_win.to_string()),
        Field::TestWord => {
            let value = match store {
                Some(store) => match store.lookup(wizard.test_word) {
                    Some(entry) => format!(
                        "{}/{} {} [{} · {}]",
                        wizard.test_word + 1,
                        store.len(),
                        entry.word,
                        entry.difficulty.label(),
                        entry.category.label()
                    ),
                    None => "none".to_string(),
                },
                None => "dictionary not loaded".to_string(),
            };
            setting("Word", value)
        }
        Field::Style => setting("Hangman", wizard.style.label().to_string()),
        Field::Sound => setting("Sound", if wizard.sound { "On" } else { "Off" }.to_string()),
        Field::Team(index) => {
            let Some(team) = wizard.teams().get(index) else {
                return Line::default();
            };
            let cursor = if focused { "_" } else { "" };
            Line::from(vec![
                Span::styled(format!("{}Team {:<11}", marker, index + 1), label_style),
                Span::styled("■ ", Style::default().fg(hex_color(&team.color))),
                Span::styled(format!("{}{}", team.name, cursor), palette.text()),
            ])
        }
        Field::AddTeam => Line::from(Span::styled(
            format!("{}[ + Add team ]", marker),
            label_style,
        )),
        Field::Start => Line::from(Span::styled(
            format!("{}[ START ]", marker),
            if focused { palette.good() } else { palette.text() },
        )),
    }
}

/// Render the in-game screen
fn render_game(frame: &mut Frame, palette: &Palette, app: &App, art: &ArtCache) {
    let area = frame.area();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(2), // Footer
        ])
        .split(area);

    render_header(frame, layout[0], palette, &app.controller);

    let content = if app.controller.is_teams() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(40), Constraint::Length(26)])
            .split(layout[1]);
        render_scoreboard(frame, columns[1], palette, &app.controller);
        columns[0]
    } else {
        layout[1]
    };

    match &app.stage {
        Stage::Guessing => render_round(frame, content, palette, app, art),
        Stage::Announcing(report) => render_result(frame, content, palette, report, None),
        Stage::Champion { report, winner } => {
            let standings = app.controller.standings();
            render_result(frame, content, palette, report, Some((winner, standings.as_slice())))
        }
    }

    let footer_text = match app.stage {
        Stage::Guessing => "Type a letter  ? Hint  Esc Exit",
        Stage::Announcing(_) => "Enter Next round  Esc Exit",
        Stage::Champion { .. } => "Enter New match  Esc Exit",
    };
    let footer = Paragraph::new(footer_text)
        .style(palette.muted())
        .alignment(Alignment::Center);
    frame.render_widget(footer, layout[2]);
}

/// Render the header: mode, round, whose turn
fn render_header(frame: &mut Frame, area: Rect, palette: &Palette, controller: &MatchController) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(palette.border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Min(20),
            Constraint::Length(16),
        ])
        .split(inner);

    let logo = Paragraph::new("HANGMAN").style(palette.title());
    frame.render_widget(logo, columns[0]);

    let turn = match controller.current_team() {
        Some(team) => Line::from(vec![
            Span::styled("Turn: ", palette.muted()),
            Span::styled(
                team.name.clone(),
                Style::default().fg(hex_color(&team.color)).bold(),
            ),
        ]),
        None => Line::from(Span::styled(
            format!("{} · {}", controller.mode().label(), controller.difficulty()),
            palette.muted(),
        )),
    };
    frame.render_widget(Paragraph::new(turn).alignment(Alignment::Center), columns[1]);

    let round = Paragraph::new(format!("Round {}", controller.round_label()))
        .style(palette.warn())
        .alignment(Alignment::Right);
    frame.render_widget(round, columns[2]);
}

/// Render the board while a round is being played
fn render_round(frame: &mut Frame, area: Rect, palette: &Palette, app: &App, art: &ArtCache) {
    let round = &app.round;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(10), // Drawing
            Constraint::Length(2),  // Word
            Constraint::Length(1),  // Category
            Constraint::Length(1),  // Attempts
            Constraint::Length(1),  // Spacer
            Constraint::Length(2),  // Letters
            Constraint::Length(1),  // Spacer
            Constraint::Length(1),  // Feedback
            Constraint::Min(0),
        ])
        .split(area);

    let drawing = art.frame(app.style, round.wrong_attempts(), round.max_attempts());
    let drawing_style = if round.outcome() == Some(RoundOutcome::Lost) {
        palette.bad()
    } else {
        Style::default().fg(palette.accent)
    };
    frame.render_widget(
        Paragraph::new(drawing)
            .style(drawing_style)
            .alignment(Alignment::Center),
        layout[0],
    );

    let word = Paragraph::new(format_board(&round.board()))
        .style(palette.selected())
        .alignment(Alignment::Center);
    frame.render_widget(word, layout[1]);

    if let Some(entry) = round.entry() {
        let category = Paragraph::new(format!(
            "{} · {}",
            entry.category.label(),
            entry.difficulty.label()
        ))
        .style(palette.muted())
        .alignment(Alignment::Center);
        frame.render_widget(category, layout[2]);
    }

    let attempts_style = if round.remaining_attempts() <= 1 {
        palette.bad()
    } else {
        palette.text()
    };
    let attempts = Paragraph::new(format!(
        "Attempts left: {}/{}",
        round.remaining_attempts(),
        round.max_attempts()
    ))
    .style(attempts_style)
    .alignment(Alignment::Center);
    frame.render_widget(attempts, layout[3]);

    let letters = Paragraph::new(letter_keys(palette, round))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    frame.render_widget(letters, layout[5]);

    let feedback_style = match app.feedback {
        Feedback::Hit(_) => palette.good(),
        Feedback::Miss(_) => palette.bad(),
        Feedback::Repeat(_) | Feedback::None => palette.warn(),
    };
    let feedback = Paragraph::new(app.feedback.text())
        .style(feedback_style)
        .alignment(Alignment::Center);
    frame.render_widget(feedback, layout[7]);
}

/// On-screen keyboard: used letters coloured by hit or miss
fn letter_keys<'a>(palette: &Palette, round: &RoundEngine) -> Line<'a> {
    let spans: Vec<Span> = ALPHABET
        .chars()
        .map(|letter| {
            let style = if !round.was_guessed(letter) {
                palette.text()
            } else if round.is_in_word(letter) {
                palette.good()
            } else {
                palette.bad().add_modifier(Modifier::CROSSED_OUT)
            };
            Span::styled(format!("{} ", letter), style)
        })
        .collect();
    Line::from(spans)
}

/// Render a round result. Once the match is decided, the champion and the
/// final standings replace the next-turn line.
fn render_result(
    frame: &mut Frame,
    area: Rect,
    palette: &Palette,
    report: &RoundReport,
    champion: Option<(&Team, &[&Team])>,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Percentage(15),
            Constraint::Length(2), // Title
            Constraint::Length(2), // Word
            Constraint::Length(2), // Team line
            Constraint::Length(2), // Next turn
            Constraint::Min(0),    // Champion and standings
        ])
        .split(area);

    let (title, title_style) = match report.outcome {
        RoundOutcome::Won => ("YOU GOT IT!", palette.good()),
        RoundOutcome::Lost => ("HANGED!", palette.bad()),
    };
    frame.render_widget(
        Paragraph::new(title)
            .style(title_style)
            .alignment(Alignment::Center),
        layout[1],
    );

    frame.render_widget(
        Paragraph::new(format!("The word was {}", report.word))
            .style(palette.selected())
            .alignment(Alignment::Center),
        layout[2],
    );

    if let Some(team) = &report.team {
        let line = match report.outcome {
            RoundOutcome::Won => format!("+1 for {} ({} pts)", team.name, team.score + 1),
            RoundOutcome::Lost => format!("No point for {}", team.name),
        };
        frame.render_widget(
            Paragraph::new(line)
                .style(Style::default().fg(hex_color(&team.color)))
                .alignment(Alignment::Center),
            layout[3],
        );
    }

    let Some((winner, standings)) = champion else {
        if let Some(next) = &report.next_team {
            let line = Line::from(vec![
                Span::styled("Next turn: ", palette.muted()),
                Span::styled(
                    next.name.clone(),
                    Style::default().fg(hex_color(&next.color)).bold(),
                ),
            ]);
            frame.render_widget(
                Paragraph::new(line).alignment(Alignment::Center),
                layout[4],
            );
        }
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!("{} WINS THE MATCH", winner.name),
            Style::default().fg(hex_color(&winner.color)).bold(),
        )),
        Line::default(),
    ];
    lines.extend(standings.iter().zip(standing_lines(standings)).map(|(team, text)| {
        Line::from(Span::styled(text, Style::default().fg(hex_color(&team.color))))
    }));

    let panel = centered_columns(layout[5], 40);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.title())
                .title(" Final scores "),
        ),
        panel,
    );
}

/// Final scores, best first, with a trophy on the leader.
fn standing_lines(standings: &[&Team]) -> Vec<String> {
    standings
        .iter()
        .enumerate()
        .map(|(rank, team)| {
            let badge = if rank == 0 { "🏆" } else { "  " };
            format!("{} {}. {:<20} {:>2} pts", badge, rank + 1, team.name, team.score)
        })
        .collect()
}

/// Render the live scoreboard (right panel)
fn render_scoreboard(frame: &mut Frame, area: Rect, palette: &Palette, controller: &MatchController) {
    let current = controller.current_team().map(|t| t.id);
    let items: Vec<ListItem> = controller
        .teams()
        .iter()
        .map(|team| {
            let marker = if Some(team.id) == current { "▶" } else { " " };
            let mut style = Style::default().fg(hex_color(&team.color));
            if Some(team.id) == current {
                style = style.bold();
            }
            ListItem::new(format!("{} {:<16} {:>2}", marker, team.name, team.score)).style(style)
        })
        .collect();

    let title = match controller.rounds_to_win() {
        Some(target) => format!("Scores (first to {})", target),
        None => "Scores".to_string(),
    };
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border())
            .title(title),
    );
    frame.render_widget(list, area);
}

/// Render a dialog over the current screen
fn render_dialog(frame: &mut Frame, palette: &Palette, dialog: &Dialog) {
    let (title, message, buttons) = match dialog {
        Dialog::Confirm { title, message, .. } => (title, message, "[Enter] Yes   [Esc] No"),
        Dialog::Alert { title, message } => (title, message, "[Enter] OK"),
    };

    let area = centered_rect(frame.area(), 50, 11);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.title())
        .title(Span::styled(format!(" {} ", title), palette.title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    frame.render_widget(
        Paragraph::new(message.as_str())
            .style(palette.text())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(buttons)
            .style(palette.selected())
            .alignment(Alignment::Center),
        rows[1],
    );
}

/// Board text: letters or blanks, with a wider gap between words
fn format_board(cells: &[Cell]) -> String {
    cells
        .iter()
        .map(|cell| match cell {
            Cell::Gap => " ".to_string(),
            Cell::Hidden => "_".to_string(),
            Cell::Shown(c) => c.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A column of the given width centered in `area`
fn centered_columns(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        width,
        ..area
    }
}

/// A box of the given size centered in `area`
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_board() {
        let cells = [
            Cell::Shown('A'),
            Cell::Hidden,
            Cell::Gap,
            Cell::Hidden,
        ];
        assert_eq!(format_board(&cells), "A _   _");
    }

    #[test]
    fn test_standing_lines_rank_and_trophy() {
        use crate::game::controller::TeamId;

        let mut first = Team::new(TeamId(2), "Leones", "#FF0000");
        first.score = 3;
        let mut second = Team::new(TeamId(1), "Águilas", "#00FF00");
        second.score = 1;

        let lines = standing_lines(&[&first, &second]);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("🏆 1. Leones"));
        assert!(lines[0].ends_with(" 3 pts"));
        assert!(lines[1].starts_with("   2. Águilas"));
        assert!(!lines[1].contains('🏆'));
    }

    #[test]
    fn test_centered_rect_fits() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered_rect(area, 50, 11);
        assert_eq!(rect, area);

        let rect = centered_rect(Rect::new(0, 0, 100, 30), 50, 10);
        assert_eq!(rect, Rect::new(25, 10, 50, 10));
    }

    #[test]
    fn test_centered_columns() {
        let rect = centered_columns(Rect::new(2, 3, 100, 20), 48);
        assert_eq!(rect, Rect::new(28, 3, 48, 20));
    }
}

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{palette::material, Color, Modifier, Style, Stylize},
    symbols::border,
    text::{Line, Span, Text},
    widgets::{
        Block, Borders, Cell, Clear, HighlightSpacing, Paragraph, Row, Table, TableState, Tabs,
        Wrap,
    },
    Frame,
};

use super::app::{App, Pane};

#[derive(Debug)]
pub struct TableColors {
    header_bg: Color,
    header_fg: Color,
    selected_row_style_fg: Color,
    selected_row_style_bg: Color,
    normal_row_color: Color,
    alt_row_color: Color,
    down_fg: Color,
    error_fg: Color,
}

impl TableColors {
    pub const fn new() -> Self {
        Self {
            header_bg: material::GREEN.c800,
            header_fg: material::GREEN.c200,
            selected_row_style_fg: material::BLACK,
            selected_row_style_bg: material::GREEN.c100,
            normal_row_color: material::GREEN.c900,
            alt_row_color: material::GREEN.c700,
            down_fg: material::GRAY.c500,
            error_fg: material::RED.c300,
        }
    }

    fn row_bg(&self, i: usize) -> Color {
        if i % 2 == 0 {
            self.normal_row_color
        } else {
            self.alt_row_color
        }
    }
}

/// helper function to create a centered rect using up certain percentage of the available rect `r`
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    // Cut the given rectangle into three vertical pieces
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    // Then cut the middle vertical piece into three width-wise pieces
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn draw_popup(frame: &mut Frame, app: &App, area: Rect) {
    frame.render_widget(Clear, area);
    let popup_block = Block::default()
        .title(Line::from("Confirm").centered())
        .title_bottom(
            Line::from(vec![
                " Confirm ".into(),
                "<Enter>".blue().bold(),
                " Decline ".into(),
                "<Esc>".blue().bold(),
            ])
            .centered(),
        )
        .borders(Borders::ALL);

    let lines = app.popup.prompt.lines().count();
    let vertical_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(popup_block.inner(area));
    // at least one line of padding
    let vertical_padding = (vertical_layout[1].height.saturating_sub(lines as u16) / 2).max(1);

    let padded_text = format!(
        "{}{}",
        "\n".repeat(vertical_padding as usize),
        app.popup.prompt,
    );

    let prompt = Paragraph::new(padded_text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    frame.render_widget(popup_block, area);
    frame.render_widget(prompt, vertical_layout[1]);
    if app.popup.show_input {
        frame.render_widget(&app.popup.input, vertical_layout[2]);
    }
}

fn header(app: &App, titles: &[&'static str]) -> Row<'static> {
    titles
        .iter()
        .copied()
        .map(Cell::from)
        .collect::<Row>()
        .style(
            Style::default()
                .bg(app.colors.header_bg)
                .fg(app.colors.header_fg),
        )
        .height(1)
}

fn render_table<'a>(
    frame: &mut Frame,
    app: &App,
    table: Table<'a>,
    area: Rect,
    state: &mut TableState,
) {
    let selected_row_style = Style::default()
        .bg(app.colors.selected_row_style_bg)
        .fg(app.colors.selected_row_style_fg);
    let table = table
        .row_highlight_style(selected_row_style)
        .highlight_spacing(HighlightSpacing::Always)
        .highlight_symbol(" █ ")
        .block(Block::bordered());
    frame.render_stateful_widget(table, area, state);
}

fn draw_creature_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let rows = app.creatures.iter().enumerate().map(|(i, creature)| {
        Row::new(vec![
            creature.name.clone(),
            creature.challenge_rating.to_string(),
            creature.creature_type.kind.clone(),
        ])
        .style(Style::new().bg(app.colors.row_bg(i)))
    });
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(45), // Name
            Constraint::Percentage(30), // Challenge
            Constraint::Fill(1),        // Type
        ],
    )
    .header(header(app, &["Name", "CR", "Type"]));
    let mut state = app.creature_state.clone();
    render_table(frame, app, table, area, &mut state);
    app.creature_state = state;
}

fn draw_spell_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let rows = app.spells.iter().enumerate().map(|(i, spell)| {
        Row::new(vec![
            spell.name.clone(),
            spell.level_label(),
            spell.school.clone(),
        ])
        .style(Style::new().bg(app.colors.row_bg(i)))
    });
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(45), // Name
            Constraint::Percentage(25), // Level
            Constraint::Fill(1),        // School
        ],
    )
    .header(header(app, &["Name", "Level", "School"]));
    let mut state = app.spell_state.clone();
    render_table(frame, app, table, area, &mut state);
    app.spell_state = state;
}

fn draw_encounter_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let rows = app
        .encounter
        .by_initiative()
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let conditions = entry
                .conditions
                .iter()
                .map(|c| c.abbreviation())
                .collect::<Vec<_>>()
                .join(" ");
            let style = if entry.is_alive() {
                Style::new().bg(app.colors.row_bg(i))
            } else {
                Style::new()
                    .bg(app.colors.row_bg(i))
                    .fg(app.colors.down_fg)
                    .add_modifier(Modifier::CROSSED_OUT)
            };
            Row::new(vec![
                entry.initiative.to_string(),
                entry.name().to_string(),
                format!("{}/{}", entry.current_hit_points, entry.max_hit_points()),
                entry.creature.armor_class.to_string(),
                conditions,
            ])
            .style(style)
        })
        .collect::<Vec<_>>();
    let table = Table::new(
        rows,
        [
            Constraint::Length(4),      // Initiative
            Constraint::Percentage(35), // Name
            Constraint::Length(8),      // HP
            Constraint::Length(3),      // AC
            Constraint::Fill(1),        // Conditions
        ],
    )
    .header(header(app, &["Ini", "Name", "HP", "AC", "Conditions"]));
    let mut state = app.encounter_state.clone();
    render_table(frame, app, table, area, &mut state);
    app.encounter_state = state;
}

fn draw_load_error(frame: &mut Frame, app: &App, error: &str, area: Rect) {
    let text = Text::from(vec![
        Line::from("Failed to load the catalog:"),
        Line::from(error.to_string()).fg(app.colors.error_fg),
        Line::from(""),
        Line::from(vec!["Press ".into(), "<r>".blue().bold(), " to retry".into()]),
    ]);
    let paragraph = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::bordered());
    frame.render_widget(paragraph, area);
}

/// Title and body of the detail pane for the highlighted row.
fn detail(app: &App) -> (String, Vec<String>) {
    match app.pane {
        Pane::Creatures => app
            .creature_state
            .selected()
            .and_then(|i| app.creatures.get(i))
            .map(|c| (c.name.clone(), c.stat_block()))
            .unwrap_or_default(),
        Pane::Spells => app
            .spell_state
            .selected()
            .and_then(|i| app.spells.get(i))
            .map(|s| (s.name.clone(), s.summary_lines()))
            .unwrap_or_default(),
        Pane::Encounter => {
            let Some(entry) = app.selected_entry().and_then(|id| app.encounter.get(&id)) else {
                return (
                    String::new(),
                    vec!["No creatures yet. Add some from the Creatures pane.".to_string()],
                );
            };
            let conditions = if entry.conditions.is_empty() {
                "none".to_string()
            } else {
                entry
                    .conditions
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            let mut lines = vec![
                format!(
                    "Current HP {}/{}",
                    entry.current_hit_points,
                    entry.max_hit_points()
                ),
                format!("Initiative {}", entry.initiative),
                format!("Conditions {conditions}"),
                String::new(),
            ];
            lines.extend(entry.creature.stat_block());
            (entry.name().to_string(), lines)
        }
    }
}

fn draw_detail(frame: &mut Frame, app: &App, area: Rect) {
    let (title, lines) = detail(app);
    let paragraph = Paragraph::new(Text::from(
        lines.into_iter().map(Line::from).collect::<Vec<_>>(),
    ))
    .wrap(Wrap { trim: false })
    .block(Block::bordered().title(Line::from(title).bold()));
    frame.render_widget(paragraph, area);
}

fn instructions(pane: Pane) -> Line<'static> {
    let keys: &[(&'static str, &'static str)] = match pane {
        Pane::Creatures => &[("Add", "<a>"), ("Reload", "<r>")],
        Pane::Spells => &[("Reload", "<r>")],
        Pane::Encounter => &[
            ("Damage", "<d>"),
            ("Heal", "<h>"),
            ("Initiative", "<i>"),
            ("Condition", "<c>"),
            ("Remove", "<x>"),
            ("Reroll", "<C-r>"),
            ("Reset", "<C-c>"),
        ],
    };
    let mut spans: Vec<Span> = vec![" Pane ".into(), "<Tab>".blue().bold()];
    for &(label, key) in keys {
        spans.push(format!(" {label} ").into());
        spans.push(key.blue().bold());
    }
    spans.push(" Quit ".into());
    spans.push("<Esc> ".blue().bold());
    Line::from(spans)
}

pub fn draw(frame: &mut Frame, app: &mut App) {
    let title = Line::from(
        format!(
            "Demesne Encounter Builder, {} in encounter",
            app.encounter.len()
        )
        .bold(),
    );
    let block = Block::default()
        .title(title.centered())
        .title_bottom(instructions(app.pane).centered())
        .borders(Borders::ALL)
        .border_set(border::THICK);
    frame.render_widget(&block, frame.area());

    let [tabs_area, body] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(block.inner(frame.area()));
    let tabs = Tabs::new(Pane::ALL.iter().map(|pane| pane.title()))
        .select(
            Pane::ALL
                .iter()
                .position(|pane| *pane == app.pane)
                .unwrap_or(0),
        )
        .highlight_style(Style::default().fg(app.colors.header_fg).bold());
    frame.render_widget(tabs, tabs_area);

    let [list_area, detail_area] =
        Layout::horizontal([Constraint::Percentage(45), Constraint::Fill(1)]).areas(body);
    match (app.pane, app.load_error.clone()) {
        (Pane::Encounter, _) => draw_encounter_table(frame, app, list_area),
        (_, Some(error)) => draw_load_error(frame, app, &error, list_area),
        (Pane::Creatures, None) => draw_creature_table(frame, app, list_area),
        (Pane::Spells, None) => draw_spell_table(frame, app, list_area),
    }
    draw_detail(frame, app, detail_area);

    if app.popup.active {
        let popup_area = centered_rect(app.popup.size.0, app.popup.size.1, frame.area());
        draw_popup(frame, app, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::BffClient;
    use demesne_core::{
        encounter::{Encounter, MemoryStore},
        fixtures,
    };
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 50)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app() -> App<'static> {
        App::with_parts(
            BffClient::new("http://127.0.0.1:1"),
            Box::new(MemoryStore::new()),
            Encounter::with_seed(1),
            true,
        )
        .unwrap()
    }

    #[test]
    fn test_creature_pane_shows_stat_block() {
        let mut app = app();
        app.creatures = fixtures::creatures();
        let screen = render(&mut app);
        assert!(screen.contains("Owlbear"));
        assert!(screen.contains("Armor Class 15"));
        assert!(screen.contains("Skills Stealth +6"));
    }

    #[test]
    fn test_load_error_is_inline() {
        let mut app = app();
        app.load_error = Some("Failed to fetch creatures".into());
        let screen = render(&mut app);
        assert!(screen.contains("Failed to fetch creatures"));
        assert!(screen.contains("to retry"));
    }

    #[test]
    fn test_encounter_pane_lists_conditions() {
        let mut app = app();
        let id = app
            .encounter
            .add(fixtures::creatures()[0].clone(), true);
        app.encounter
            .toggle_condition(&id, demesne_core::encounter::Condition::Prone)
            .unwrap();
        app.pane = Pane::Encounter;
        let screen = render(&mut app);
        assert!(screen.contains("7/7"));
        assert!(screen.contains("PRN"));
        assert!(screen.contains("Conditions Prone"));
    }
}

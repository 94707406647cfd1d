use color_eyre::{eyre::Context, Result};
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use demesne_core::{
    encounter::{Condition, Encounter, EncounterStore, EncounterUpdate},
    types::{Creature, Spell},
};
use log::{error, info, warn};
use ratatui::widgets::TableState;
use tokio::runtime::Runtime;
use tui_textarea::{Input, Key, TextArea};

use super::{
    cli::Args,
    terminal,
    ui::{self, TableColors},
};
use crate::api::BffClient;

#[derive(Default)]
pub struct Popup<'t> {
    pub active: bool,
    pub prompt: String,
    pub input: TextArea<'t>,
    pub show_input: bool,
    pub confirm_action: Option<Box<dyn FnMut(&mut App<'t>, String) + Send>>,
    pub size: (u16, u16),
}

impl<'t> Popup<'t> {
    pub fn new() -> Self {
        let mut input = TextArea::default();
        input.set_alignment(ratatui::layout::Alignment::Center);
        Self {
            active: false,
            prompt: "".to_string(),
            input,
            show_input: false,
            confirm_action: None,
            size: (30, 20),
        }
    }

    pub fn show<F: FnMut(&mut App<'t>, String) + Send + 'static>(
        &mut self,
        prompt: &str,
        show_input: bool,
        size: (u16, u16),
        action: F,
    ) {
        // clear the input
        self.input.select_all();
        self.input.cut();

        self.active = true;
        self.prompt = prompt.to_string();
        self.show_input = show_input;
        self.confirm_action = Some(Box::new(action));
        self.size = size;
    }

    pub fn hide(&mut self) {
        self.active = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    Creatures,
    Spells,
    Encounter,
}

impl Pane {
    pub const ALL: [Pane; 3] = [Pane::Creatures, Pane::Spells, Pane::Encounter];

    pub fn next(self) -> Self {
        match self {
            Pane::Creatures => Pane::Spells,
            Pane::Spells => Pane::Encounter,
            Pane::Encounter => Pane::Creatures,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Pane::Creatures => "Creatures",
            Pane::Spells => "Spells",
            Pane::Encounter => "Encounter",
        }
    }
}

pub struct App<'t> {
    pub exit: bool,
    pub pane: Pane,
    pub creatures: Vec<Creature>,
    pub spells: Vec<Spell>,
    /// Set when the last catalog load failed.
    pub load_error: Option<String>,
    pub encounter: Encounter,
    pub creature_state: TableState,
    pub spell_state: TableState,
    pub encounter_state: TableState,
    pub popup: Popup<'t>,
    pub colors: TableColors,
    dedupe: bool,
    client: BffClient,
    store: Box<dyn EncounterStore>,
    runtime: Runtime,
}

impl<'t> App<'t> {
    pub fn new(args: &Args, store: Box<dyn EncounterStore>, encounter: Encounter) -> Result<Self> {
        let client = BffClient::new(&args.api_url);
        let mut app = Self::with_parts(client, store, encounter, !args.no_dedupe)?;
        app.reload();
        Ok(app)
    }

    pub fn with_parts(
        client: BffClient,
        store: Box<dyn EncounterStore>,
        encounter: Encounter,
        dedupe: bool,
    ) -> Result<Self> {
        let runtime = Runtime::new().wrap_err("Failed to start the async runtime")?;
        Ok(Self {
            exit: false,
            pane: Pane::default(),
            creatures: Vec::new(),
            spells: Vec::new(),
            load_error: None,
            encounter,
            creature_state: TableState::default().with_selected(0),
            spell_state: TableState::default().with_selected(0),
            encounter_state: TableState::default().with_selected(0),
            popup: Popup::new(),
            colors: TableColors::new(),
            dedupe,
            client,
            store,
            runtime,
        })
    }

    /// runs the application's main loop until the user quits
    pub fn run(&mut self, terminal: &mut terminal::Tui) -> Result<Encounter> {
        while !self.exit {
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events().wrap_err("handle events failed")?;
        }
        Ok(self.encounter.clone())
    }

    /// Fetches creatures and spells from the API. Failures are kept for display.
    pub fn reload(&mut self) {
        info!("Loading catalog from {}", self.client.base_url());
        let result = self
            .runtime
            .block_on(async { tokio::try_join!(self.client.creatures(), self.client.spells()) });
        match result {
            Ok((creatures, spells)) => {
                info!("Loaded {} creatures and {} spells", creatures.len(), spells.len());
                self.creatures = creatures;
                self.spells = spells;
                self.load_error = None;
                self.creature_state.select(Some(0));
                self.spell_state.select(Some(0));
            }
            Err(err) => {
                error!("Failed to load catalog: {err}");
                self.load_error = Some(err.to_string());
            }
        }
    }

    /// Id of the highlighted encounter entry.
    pub fn selected_entry(&self) -> Option<String> {
        let index = self.encounter_state.selected()?;
        self.encounter
            .by_initiative()
            .get(index)
            .map(|entry| entry.id().to_string())
    }

    /// Moves the encounter cursor onto the entry with `id`, wherever the initiative order put it.
    pub fn select_entry(&mut self, id: &str) {
        if let Some(index) = self
            .encounter
            .by_initiative()
            .iter()
            .position(|entry| entry.id() == id)
        {
            self.encounter_state.select(Some(index));
        }
    }

    /// updates the application's state based on user input
    fn handle_events(&mut self) -> Result<()> {
        match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                self.handle_key(key_event)
            }
            _ => Ok(()),
        }
    }

    /// Applies a key press and saves the encounter afterwards.
    pub fn handle_key(&mut self, key_event: KeyEvent) -> Result<()> {
        let handled = if self.popup.active {
            self.handle_popup_key_event(key_event)
        } else {
            self.handle_key_event(key_event)
        };
        handled.wrap_err_with(|| format!("handling key event failed:\n{key_event:#?}"))?;
        self.backup()
    }

    fn backup(&self) -> Result<()> {
        self.store
            .save(self.encounter.creatures())
            .wrap_err("Failed to save the encounter")
    }

    fn handle_popup_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        match key_event.into() {
            Input { key: Key::Esc, .. } => self.popup.hide(),
            Input {
                key: Key::Enter, ..
            } => {
                if let Some(mut action) = self.popup.confirm_action.take() {
                    let input = self.popup.input.lines().join("");
                    action(self, input);
                }
                self.popup.hide();
            }
            input => {
                self.popup.input.input(input);
            }
        };
        Ok(())
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        let in_encounter = self.pane == Pane::Encounter;
        match key_event.into() {
            Input { key: Key::Esc, .. } => self.confirm_close(),
            Input { key: Key::Tab, .. } => self.pane = self.pane.next(),
            Input { key: Key::Down, .. } => self.move_selection(1),
            Input { key: Key::Up, .. } => self.move_selection(-1),
            Input {
                key: Key::Char('r'),
                ctrl: true,
                ..
            } if in_encounter => self.reroll_initiative(),
            Input {
                key: Key::Char('c'),
                ctrl: true,
                ..
            } if in_encounter => self.confirm_reset(),
            Input {
                key: Key::Char('r'),
                ctrl: false,
                ..
            } => self.reload(),
            Input {
                key: Key::Char('a'),
                ctrl: false,
                ..
            }
            | Input {
                key: Key::Enter, ..
            } if self.pane == Pane::Creatures => self.add_selected(),
            Input {
                key: Key::Char('d'),
                ctrl: false,
                ..
            } if in_encounter => self.damage_heal(false),
            Input {
                key: Key::Char('h'),
                ctrl: false,
                ..
            } if in_encounter => self.damage_heal(true),
            Input {
                key: Key::Char('i'),
                ctrl: false,
                ..
            } if in_encounter => self.set_initiative(),
            Input {
                key: Key::Char('c'),
                ctrl: false,
                ..
            } if in_encounter => self.change_conditions(),
            Input {
                key: Key::Char('x'),
                ctrl: false,
                ..
            }
            | Input {
                key: Key::Delete, ..
            } if in_encounter => self.remove_selected(),
            _ => {}
        }
        Ok(())
    }

    fn pane_len(&self) -> usize {
        match self.pane {
            Pane::Creatures => self.creatures.len(),
            Pane::Spells => self.spells.len(),
            Pane::Encounter => self.encounter.len(),
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.pane_len();
        let state = match self.pane {
            Pane::Creatures => &mut self.creature_state,
            Pane::Spells => &mut self.spell_state,
            Pane::Encounter => &mut self.encounter_state,
        };
        if len == 0 {
            state.select(Some(0));
            return;
        }
        let current = state.selected().unwrap_or(0).min(len - 1);
        state.select(Some(current.saturating_add_signed(delta).min(len - 1)));
    }

    fn add_selected(&mut self) {
        let Some(creature) = self
            .creature_state
            .selected()
            .and_then(|i| self.creatures.get(i))
            .cloned()
        else {
            return;
        };
        self.encounter.add(creature, self.dedupe);
    }

    fn remove_selected(&mut self) {
        if let Some(id) = self.selected_entry() {
            self.encounter.remove(&id);
            let last = self.encounter.len().saturating_sub(1);
            if self.encounter_state.selected().is_some_and(|i| i > last) {
                self.encounter_state.select(Some(last));
            }
        }
    }

    fn damage_heal(&mut self, heal: bool) {
        let prompt = if heal {
            "Enter heal amount:"
        } else {
            "Enter damage amount:"
        };
        if let Some(id) = self.selected_entry() {
            self.popup
                .show(prompt, true, (30, 20), move |app, input_amount| {
                    if let Ok(amount) = input_amount.trim().parse::<i32>() {
                        let result = if heal {
                            app.encounter.heal(&id, amount)
                        } else {
                            app.encounter.damage(&id, amount)
                        };
                        if let Err(err) = result {
                            warn!("{err}");
                        }
                    }
                });
        }
    }

    fn set_initiative(&mut self) {
        if let Some(id) = self.selected_entry() {
            self.popup
                .show("Enter initiative:", true, (30, 20), move |app, input| {
                    if let Ok(initiative) = input.trim().parse::<i32>() {
                        let update = EncounterUpdate {
                            initiative: Some(initiative),
                            ..Default::default()
                        };
                        match app.encounter.update(&id, update) {
                            Ok(()) => app.select_entry(&id),
                            Err(err) => warn!("{err}"),
                        }
                    }
                });
        }
    }

    fn reroll_initiative(&mut self) {
        let selected = self.selected_entry();
        self.encounter.reroll_initiative(true);
        if let Some(id) = selected {
            self.select_entry(&id);
        }
    }

    fn change_conditions(&mut self) {
        let Some(id) = self.selected_entry() else {
            return;
        };
        let Some(entry) = self.encounter.get(&id) else {
            return;
        };

        let prompt_text = Condition::ALL
            .iter()
            .enumerate()
            .map(|(i, condition)| {
                let marker = if entry.conditions.contains(condition) {
                    "[X]"
                } else {
                    "[ ]"
                };
                format!("{} {} - {}", marker, i + 1, condition)
            })
            .collect::<Vec<String>>()
            .join("\n");

        self.popup.show(
            &format!("Select condition to toggle:\n\n{}", prompt_text),
            true,
            (30, 60),
            move |app, input| {
                let condition = input
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| index.checked_sub(1))
                    .and_then(|index| Condition::ALL.get(index).copied());
                if let Some(condition) = condition {
                    if let Err(err) = app.encounter.toggle_condition(&id, condition) {
                        warn!("{err}");
                    }
                }
            },
        );
    }

    fn exit(&mut self) {
        self.exit = true;
    }

    fn confirm_reset(&mut self) {
        self.popup.show(
            "Restore all hit points and clear conditions?",
            false,
            (30, 20),
            |app, _| app.encounter.reset(),
        );
    }

    fn confirm_close(&mut self) {
        self.popup.show(
            "Do you want to close the application?",
            false,
            (30, 20),
            |app, _| app.exit(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Json, Router};
    use crossterm::event::{KeyCode, KeyModifiers};
    use demesne_core::{encounter::MemoryStore, fixtures};
    use rstest::rstest;

    fn app() -> App<'static> {
        let mut app = App::with_parts(
            BffClient::new("http://127.0.0.1:1"),
            Box::new(MemoryStore::new()),
            Encounter::with_seed(7),
            true,
        )
        .unwrap();
        app.creatures = fixtures::creatures();
        app.spells = fixtures::spells();
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap();
    }

    fn press_ctrl(app: &mut App, c: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
            .unwrap();
    }

    fn answer(app: &mut App, text: &str) {
        assert!(app.popup.active);
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
        press(app, KeyCode::Enter);
    }

    /// Adds the highlighted catalog creature `times` times and switches to the encounter.
    fn with_goblins(times: usize) -> App<'static> {
        let mut app = app();
        for _ in 0..times {
            press(&mut app, KeyCode::Char('a'));
        }
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.pane, Pane::Encounter);
        app
    }

    fn first_entry(app: &App) -> demesne_core::encounter::SelectedCreature {
        app.encounter.by_initiative()[0].clone()
    }

    #[test]
    fn test_tab_cycles_panes() {
        let mut app = app();
        let seen: Vec<Pane> = (0..3)
            .map(|_| {
                press(&mut app, KeyCode::Tab);
                app.pane
            })
            .collect();
        assert_eq!(seen, vec![Pane::Spells, Pane::Encounter, Pane::Creatures]);
    }

    #[test]
    fn test_add_numbers_duplicates_and_saves() {
        let app = with_goblins(2);
        let mut names: Vec<&str> = app.encounter.creatures().iter().map(|c| c.name()).collect();
        names.sort();
        assert_eq!(names, vec!["Goblin 1", "Goblin 2"]);
        assert_eq!(app.store.load().unwrap().len(), 2);
    }

    #[test]
    fn test_add_selected_creature() {
        let mut app = app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.encounter.creatures()[0].name(), "Owlbear");
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut app = app();
        for _ in 0..10 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.creature_state.selected(), Some(2));
        press(&mut app, KeyCode::Up);
        assert_eq!(app.creature_state.selected(), Some(1));
    }

    #[test]
    fn test_damage_and_heal() {
        let mut app = with_goblins(1);
        press(&mut app, KeyCode::Char('d'));
        answer(&mut app, "3");
        assert_eq!(first_entry(&app).current_hit_points, 4);

        press(&mut app, KeyCode::Char('h'));
        answer(&mut app, "10");
        assert_eq!(first_entry(&app).current_hit_points, 7);

        press(&mut app, KeyCode::Char('d'));
        answer(&mut app, "lots");
        assert_eq!(first_entry(&app).current_hit_points, 7);
    }

    #[rstest]
    #[case('d', "3", 4)]
    #[case('d', "30", 0)]
    #[case('d', " 2 ", 5)]
    #[case('h', "3", 7)]
    #[case('d', "-", 7)]
    fn test_hit_point_prompt(#[case] key: char, #[case] input: &str, #[case] expected: i32) {
        let mut app = with_goblins(1);
        press(&mut app, KeyCode::Char(key));
        answer(&mut app, input);
        assert_eq!(first_entry(&app).current_hit_points, expected);
    }

    #[test]
    fn test_set_initiative() {
        let mut app = with_goblins(1);
        press(&mut app, KeyCode::Char('i'));
        answer(&mut app, "25");
        assert_eq!(first_entry(&app).initiative, 25);
    }

    #[test]
    fn test_cursor_follows_entry_after_initiative_change() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);

        press(&mut app, KeyCode::Char('i'));
        answer(&mut app, "30");
        let top = app.selected_entry().unwrap();
        press(&mut app, KeyCode::Char('i'));
        answer(&mut app, "-5");

        assert_eq!(app.encounter_state.selected(), Some(1));
        assert_eq!(app.selected_entry().unwrap(), top);
        assert_eq!(app.encounter.get(&top).unwrap().initiative, -5);
    }

    #[test]
    fn test_cursor_follows_entry_after_reroll() {
        let mut app = app();
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Down);

        for _ in 0..5 {
            let before = app.selected_entry().unwrap();
            press_ctrl(&mut app, 'r');
            assert_eq!(app.selected_entry().unwrap(), before);
        }
    }

    #[test]
    fn test_toggle_condition() {
        let mut app = with_goblins(1);
        press(&mut app, KeyCode::Char('c'));
        answer(&mut app, "4");
        assert!(first_entry(&app)
            .conditions
            .contains(&Condition::Frightened));

        press(&mut app, KeyCode::Char('c'));
        assert!(app.popup.prompt.contains("[X] 4 - Frightened"));
        answer(&mut app, "4");
        assert!(first_entry(&app).conditions.is_empty());
    }

    #[test]
    fn test_remove_entry() {
        let mut app = with_goblins(2);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.encounter.len(), 1);
        assert_eq!(app.encounter_state.selected(), Some(0));
        press(&mut app, KeyCode::Delete);
        assert!(app.encounter.is_empty());
        assert!(app.store.load().unwrap().is_empty());
    }

    #[test]
    fn test_reroll_groups_by_name() {
        let mut app = with_goblins(3);
        press_ctrl(&mut app, 'r');
        let initiatives: Vec<i32> = app.encounter.creatures().iter().map(|c| c.initiative).collect();
        assert!(initiatives.iter().all(|i| *i == initiatives[0]));
    }

    #[test]
    fn test_reset_after_confirm() {
        let mut app = with_goblins(1);
        press(&mut app, KeyCode::Char('d'));
        answer(&mut app, "5");
        press_ctrl(&mut app, 'c');
        press(&mut app, KeyCode::Esc);
        assert_eq!(first_entry(&app).current_hit_points, 2);
        press_ctrl(&mut app, 'c');
        press(&mut app, KeyCode::Enter);
        assert_eq!(first_entry(&app).current_hit_points, 7);
    }

    #[test]
    fn test_encounter_keys_ignored_elsewhere() {
        let mut app = with_goblins(1);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.encounter.len(), 1);
        assert!(!app.popup.active);
    }

    #[test]
    fn test_quit_needs_confirmation() {
        let mut app = app();
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Esc);
        assert!(!app.exit);
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Enter);
        assert!(app.exit);
    }

    #[test]
    fn test_reload_failure_is_kept() {
        let mut app = app();
        press(&mut app, KeyCode::Char('r'));
        assert!(app.load_error.is_some());
        assert_eq!(app.creatures.len(), 3);
    }

    #[test]
    fn test_reload_from_api() {
        let mut app = app();
        app.creatures.clear();
        app.load_error = Some("offline".into());
        let router = Router::new()
            .route(
                "/api/creatures",
                get(|| async { Json(fixtures::creatures()[..1].to_vec()) }),
            )
            .route("/api/spells", get(|| async { Json(fixtures::spells()) }));
        let url = app.runtime.block_on(crate::api::tests::serve(router));
        app.client = BffClient::new(&url);

        app.reload();
        assert!(app.load_error.is_none());
        assert_eq!(app.creatures.len(), 1);
        assert_eq!(app.spells.len(), 3);
    }
}

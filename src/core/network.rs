//! # Network
//!
//! Active connections and suggested profiles, with a shared search and
//! skill/location filter. Connecting moves a suggestion into the active list.

use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NetworkTab {
    #[default]
    Active,
    Suggestions,
}

impl NetworkTab {
    pub const ALL: [NetworkTab; 2] = [NetworkTab::Active, NetworkTab::Suggestions];

    pub fn label(self) -> &'static str {
        match self {
            NetworkTab::Active => "Conexões Ativas",
            NetworkTab::Suggestions => "Sugestões",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Csv,
}

impl ExportFormat {
    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "PDF",
            ExportFormat::Csv => "CSV",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub id: String,
    pub name: String,
    pub role: String,
    pub location: String,
    pub skills: Vec<String>,
    pub mutual_connections: u32,
    /// `None` for suggestions that aren't connected yet.
    pub connected_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkFilter {
    pub search: String,
    pub skill: Option<String>,
    pub location: Option<String>,
}

impl NetworkFilter {
    /// Search is a case-insensitive substring of name or role; skill and
    /// location must match exactly when set.
    pub fn matches(&self, connection: &Connection) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = connection.name.to_lowercase().contains(&needle)
            || connection.role.to_lowercase().contains(&needle);
        let matches_skill = self
            .skill
            .as_ref()
            .is_none_or(|skill| connection.skills.contains(skill));
        let matches_location = self
            .location
            .as_ref()
            .is_none_or(|location| &connection.location == location);
        matches_search && matches_skill && matches_location
    }
}

/// Step `current` through `options`, wrapping back to `None` ("all") after the last.
pub fn cycle_option(current: Option<&str>, options: &[String]) -> Option<String> {
    let next = match current {
        None => 0,
        Some(value) => options.iter().position(|o| o == value)? + 1,
    };
    options.get(next).cloned()
}

fn unique<'a>(values: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !out.contains(value) {
            out.push(value.clone());
        }
    }
    out
}

#[derive(Debug, Clone)]
pub struct NetworkBoard {
    connections: Vec<Connection>,
    suggestions: Vec<Connection>,
    /// Filter options, fixed from the initial dataset.
    skills: Vec<String>,
    locations: Vec<String>,
    pub tab: NetworkTab,
    pub filter: NetworkFilter,
}

impl NetworkBoard {
    pub fn new(connections: Vec<Connection>, suggestions: Vec<Connection>) -> Self {
        let everyone = || connections.iter().chain(suggestions.iter());
        let skills = unique(everyone().flat_map(|c| c.skills.iter()));
        let locations = unique(everyone().map(|c| &c.location));
        Self {
            connections,
            suggestions,
            skills,
            locations,
            tab: NetworkTab::default(),
            filter: NetworkFilter::default(),
        }
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn suggestions(&self) -> &[Connection] {
        &self.suggestions
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    /// Entries of the current tab that pass the filter.
    pub fn visible(&self) -> Vec<&Connection> {
        let source = match self.tab {
            NetworkTab::Active => &self.connections,
            NetworkTab::Suggestions => &self.suggestions,
        };
        source.iter().filter(|c| self.filter.matches(c)).collect()
    }

    pub fn cycle_skill(&mut self) {
        self.filter.skill = cycle_option(self.filter.skill.as_deref(), &self.skills);
    }

    pub fn cycle_location(&mut self) {
        self.filter.location = cycle_option(self.filter.location.as_deref(), &self.locations);
    }

    /// Move suggestion `id` into the active connections, dated `today`.
    /// Returns the connected name, or `None` for an unknown id.
    pub fn connect(&mut self, id: &str, today: NaiveDate) -> Option<String> {
        let index = self.suggestions.iter().position(|c| c.id == id)?;
        let mut connection = self.suggestions.remove(index);
        connection.connected_on = Some(today);
        let name = connection.name.clone();
        self.connections.push(connection);
        Some(name)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.connections.len();
        self.connections.retain(|c| c.id != id);
        self.connections.len() != before
    }
}

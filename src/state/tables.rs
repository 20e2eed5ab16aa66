use nhl_api::PlayerResult;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortColumn {
    Name,
    Goals,
    Assists,
    PlusMinus,
    #[default]
    FantasyPoints,
}

impl SortColumn {
    pub const ALL: [SortColumn; 5] = [
        SortColumn::Name,
        SortColumn::Goals,
        SortColumn::Assists,
        SortColumn::PlusMinus,
        SortColumn::FantasyPoints,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            SortColumn::Name => "Name",
            SortColumn::Goals => "Goals",
            SortColumn::Assists => "Assists",
            SortColumn::PlusMinus => "+/-",
            SortColumn::FantasyPoints => "Fantasy Points",
        }
    }

    fn compare(&self, a: &PlayerResult, b: &PlayerResult) -> Ordering {
        match self {
            SortColumn::Name => a.name.cmp(&b.name),
            SortColumn::Goals => a.goals.cmp(&b.goals),
            SortColumn::Assists => a.assists.cmp(&b.assists),
            SortColumn::PlusMinus => a.plus_minus.cmp(&b.plus_minus),
            SortColumn::FantasyPoints => a.fantasy_points.total_cmp(&b.fantasy_points),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: SortColumn,
    pub descending: bool,
}

impl Default for SortState {
    fn default() -> Self {
        Self { column: SortColumn::FantasyPoints, descending: true }
    }
}

/// Sort rows by `sort`, ties broken by name ascending regardless of direction.
pub fn sort_rows(rows: &mut [PlayerResult], sort: SortState) {
    rows.sort_by(|a, b| {
        let primary = sort.column.compare(a, b);
        let primary = if sort.descending { primary.reverse() } else { primary };
        primary.then_with(|| a.name.cmp(&b.name))
    });
}

/// One position's table: rows, active sort and row selection.
#[derive(Debug, Default)]
pub struct TableView {
    pub rows: Vec<PlayerResult>,
    pub sort: SortState,
    pub selected: usize,
}

impl TableView {
    /// Replace the rows from a new fetch cycle. Sort choice survives, selection resets.
    pub fn load(&mut self, rows: Vec<PlayerResult>) {
        self.rows = rows;
        self.selected = 0;
        sort_rows(&mut self.rows, self.sort);
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.selected = 0;
    }

    /// Sort by `column`. Choosing the active column again flips direction;
    /// a new column starts descending, except names which start A→Z.
    pub fn sort_by(&mut self, column: SortColumn) {
        self.sort = if self.sort.column == column {
            SortState { column, descending: !self.sort.descending }
        } else {
            SortState { column, descending: column != SortColumn::Name }
        };
        sort_rows(&mut self.rows, self.sort);
    }

    pub fn select_next(&mut self) {
        let max = self.rows.len().saturating_sub(1);
        self.selected = (self.selected + 1).min(max);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Top,
    Bottom,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Navigate(Direction),
    EnterSearchMode,
    ExitSearchMode,
    ClearSearch,
    UpdateSearch(String),
    CycleFilter,
    CycleSortKey,
    ToggleAutoRefresh,
    ToggleDetailPanel,
    ToggleHelp,
    CycleTheme,
    Refresh,
    /// Arm the kill confirmation prompt for the selected process.
    ConfirmKill(u32),
    /// Confirmed: issue the kill request.
    Kill(u32),
    CancelKill,
    None,
}

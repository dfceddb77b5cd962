//! Side panels that can be expanded or collapsed

/// Which of the two side panels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelSide {
    Left,
    Right,
}

/// A collapsible panel.
///
/// Its trigger button is only visible while the panel is collapsed. The panel also has a close button inside it, that toggles it just as the trigger does.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Panel {
    expanded: bool,
}

impl Panel {
    pub fn is_expanded(&self) -> bool           { self.expanded }
    pub fn is_trigger_visible(&self) -> bool    { self.expanded == false }

    /// Called by both the trigger and the close button
    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }
}

/// The two side panels of the page
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Panels {
    left: Panel,
    right: Panel,
}

impl Panels {
    pub fn get(&self, side: PanelSide) -> &Panel {
        match side {
            PanelSide::Left => &self.left,
            PanelSide::Right => &self.right,
        }
    }

    pub fn toggle(&mut self, side: PanelSide) {
        match side {
            PanelSide::Left => self.left.toggle(),
            PanelSide::Right => self.right.toggle(),
        }
    }
}

use ratatui::{
    prelude::{Buffer, Rect, StatefulWidget, Widget},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub disabled: bool,
}

impl SelectOption {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
            disabled: false,
        }
    }

    #[must_use]
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            label: label.into(),
            disabled: true,
        }
    }
}

/// A list of options with at most one selected, like an HTML `<select>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    options: Vec<SelectOption>,
    selected: Option<usize>,
}

impl Selector {
    #[must_use]
    pub fn new(options: Vec<SelectOption>, selected: Option<usize>) -> Self {
        let selected = selected.filter(|&idx| idx < options.len());
        Self { options, selected }
    }

    #[must_use]
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    #[must_use]
    pub const fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Value of the selected option, unless it is disabled
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.selected
            .and_then(|idx| self.options.get(idx))
            .filter(|option| !option.disabled)
            .map(|option| option.value.as_str())
    }

    #[must_use]
    pub fn position(&self, value: &str) -> Option<usize> {
        self.options
            .iter()
            .position(|option| !option.disabled && option.value == value)
    }

    /// Select the option with `value`; returns whether one matched
    pub fn select_value(&mut self, value: &str) -> bool {
        let found = self.position(value);
        if found.is_some() {
            self.selected = found;
        }
        found.is_some()
    }

    pub fn select_next(&mut self) {
        self.step(1);
    }

    pub fn select_previous(&mut self) {
        self.step(-1);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.iter().all(|option| option.disabled)
    }

    /// Move to the next enabled option in `direction`, wrapping around
    fn step(&mut self, direction: isize) {
        let len = self.options.len();
        if self.is_empty() {
            return;
        }
        let mut idx = self.selected.unwrap_or(if direction > 0 {
            len - 1
        } else {
            0
        });
        for _ in 0..len {
            idx = (idx + len).wrapping_add_signed(direction) % len;
            if self.options.get(idx).is_some_and(|o| !o.disabled) {
                self.selected = Some(idx);
                return;
            }
        }
    }
}

/// Compact single-line rendering: `< label >`
pub struct SelectorLine<'a> {
    pub selector: &'a Selector,
    pub placeholder: &'a str,
    pub is_focused: bool,
}

impl Widget for SelectorLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let option = self
            .selector
            .selected_index()
            .and_then(|idx| self.selector.options().get(idx))
            .or_else(|| self.selector.options().first());
        let (label, style) = match option {
            Some(option) if !option.disabled => {
                (option.label.as_str(), Style::default().fg(Color::White))
            }
            Some(option) => {
                (option.label.as_str(), Style::default().fg(Color::DarkGray))
            }
            None => (self.placeholder, Style::default().fg(Color::DarkGray)),
        };
        let style = if self.is_focused {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        };
        Line::from(vec![
            Span::raw("< "),
            Span::styled(label.to_string(), style),
            Span::raw(" >"),
        ])
        .render(area, buf);
    }
}

/// Full list rendering, used inside the connections modal
pub struct SelectorList<'a> {
    pub selector: &'a Selector,
    pub is_focused: bool,
}

impl Widget for SelectorList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let items = self
            .selector
            .options()
            .iter()
            .map(|option| {
                let style = if option.disabled {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(option.label.clone()).style(style)
            })
            .collect::<Vec<_>>();

        let highlight = if self.is_focused {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::Black).bg(Color::Gray)
        };
        let list = List::new(items)
            .highlight_style(highlight)
            .highlight_symbol("> ");
        let mut state =
            ListState::default().with_selected(self.selector.selected_index());
        StatefulWidget::render(list, area, buf, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector(values: &[&str], selected: Option<usize>) -> Selector {
        Selector::new(
            values.iter().map(|v| SelectOption::new(*v)).collect(),
            selected,
        )
    }

    #[test]
    fn test_placeholder_has_no_value() {
        let selector = Selector::new(
            vec![SelectOption::placeholder("No configurations")],
            Some(0),
        );
        assert_eq!(selector.value(), None);
        assert!(selector.is_empty());
    }

    #[test]
    fn test_step_wraps() {
        let mut selector = selector(&["a", "b", "c"], Some(2));
        selector.select_next();
        assert_eq!(selector.value(), Some("a"));
        selector.select_previous();
        assert_eq!(selector.value(), Some("c"));
    }

    #[test]
    fn test_step_from_nothing() {
        let mut selector = selector(&["a", "b"], None);
        selector.select_next();
        assert_eq!(selector.value(), Some("a"));

        let mut selector = self::selector(&["a", "b"], None);
        selector.select_previous();
        assert_eq!(selector.value(), Some("b"));
    }

    #[test]
    fn test_out_of_range_selection_is_dropped() {
        let selector = selector(&["a"], Some(3));
        assert_eq!(selector.selected_index(), None);
    }

    #[test]
    fn test_select_value() {
        let mut selector = selector(&["a", "b"], None);
        assert!(selector.select_value("b"));
        assert!(!selector.select_value("z"));
        assert_eq!(selector.value(), Some("b"));
    }
}

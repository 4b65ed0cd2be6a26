//! Row and Column.

use super::{Layout, LayoutProps};
use crate::geometry::Axis;
use crate::style::{FlexDirection, FlexWrap, Style, StyleList};
use crate::view::Element;

fn stack(axis: Axis, base: Style, children: Vec<Element>, props: &LayoutProps) -> Element {
    let half = props.spacing() / 2.0;
    let styles = StyleList::of(base.margin_along(axis, -half)).with_opt(props.style.as_ref());
    let cells = children.into_iter().map(|child| {
        Element::view()
            .with_style(Style::new().padding_along(axis, half))
            .with_child(child)
    });
    Element::view().with_styles(styles).with_children(cells)
}

/// Horizontal arrangement that wraps onto new lines when it overflows.
#[derive(Debug, Clone, Copy, Default)]
pub struct Row;

impl Layout for Row {
    fn arrange(&self, children: Vec<Element>, props: &LayoutProps) -> Element {
        let base = Style::new()
            .flex_direction(FlexDirection::Row)
            .flex_wrap(FlexWrap::Wrap);
        stack(Axis::Horizontal, base, children, props)
    }
}

/// Vertical stack.
#[derive(Debug, Clone, Copy, Default)]
pub struct Column;

impl Layout for Column {
    fn arrange(&self, children: Vec<Element>, props: &LayoutProps) -> Element {
        let base = Style::new().flex_direction(FlexDirection::Column);
        stack(Axis::Vertical, base, children, props)
    }
}

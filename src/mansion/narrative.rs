//! Narrative text buffer.
//!
//! Fragments are kept newest-first: every new fragment goes in front of
//! what is already there. A group emitted together (the opening text, a
//! front-door ending) keeps its own reading order.

use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FragmentKind {
    /// Big banner (`<h1>`): title screen, endings.
    Title,
    /// Action confirmation (`<h3>`).
    Heading,
    /// Small hint (`<h5>`).
    Prompt,
    /// Body text (`<p>`); lines are joined with `<br>`.
    Paragraph,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fragment {
    pub kind: FragmentKind,
    pub lines: Vec<String>,
}

impl Fragment {
    pub fn title(text: impl Into<String>) -> Self {
        Self { kind: FragmentKind::Title, lines: vec![text.into()] }
    }

    pub fn heading(text: impl Into<String>) -> Self {
        Self { kind: FragmentKind::Heading, lines: vec![text.into()] }
    }

    pub fn prompt(text: impl Into<String>) -> Self {
        Self { kind: FragmentKind::Prompt, lines: vec![text.into()] }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self { kind: FragmentKind::Paragraph, lines: vec![text.into()] }
    }

    /// A paragraph with hard line breaks.
    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: FragmentKind::Paragraph,
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn to_html(&self) -> String {
        let tag = match self.kind {
            FragmentKind::Title => "h1",
            FragmentKind::Heading => "h3",
            FragmentKind::Prompt => "h5",
            FragmentKind::Paragraph => "p",
        };
        format!("<{tag}>{}</{tag}>", self.lines.join("<br>"))
    }

    /// Plain text with `\n` between lines.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

#[derive(Clone, Debug, Default)]
pub struct Narrative {
    fragments: VecDeque<Fragment>,
}

impl Narrative {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.fragments.clear();
    }

    /// Put a fragment in front of everything already in the buffer.
    pub fn prepend(&mut self, fragment: Fragment) {
        self.fragments.push_front(fragment);
    }

    /// Put a group in front, keeping the group's own order.
    pub fn prepend_group(&mut self, group: Vec<Fragment>) {
        for fragment in group.into_iter().rev() {
            self.fragments.push_front(fragment);
        }
    }

    /// Fragments in display order (newest first).
    pub fn fragments(&self) -> impl Iterator<Item = &Fragment> {
        self.fragments.iter()
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.fragments
            .iter()
            .any(|f| f.lines.iter().any(|line| line.contains(needle)))
    }

    pub fn to_html(&self) -> String {
        self.fragments.iter().map(Fragment::to_html).collect()
    }
}

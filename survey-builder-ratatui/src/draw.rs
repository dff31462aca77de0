//! Rendering of the survey form.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};
use survey_builder::{Question, QuestionKind, SurveyDocument};

use crate::form::{Drag, FormState, Row, Status};

/// Color theme for the TUI form.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub text: Color,
    pub highlight: Color,
    pub error: Color,
    pub success: Color,
    pub border: Color,
    pub selected_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            secondary: Color::Blue,
            text: Color::White,
            highlight: Color::Yellow,
            error: Color::Red,
            success: Color::Green,
            border: Color::Gray,
            selected_bg: Color::DarkGray,
        }
    }
}

const HELP: &str =
    "Tab/↑/↓: Navigate  Enter: Add/Next  Ctrl+↑/↓: Move question  F10/Ctrl+S: Submit  Esc: Quit";

/// The form laid out as text lines, with the line and label width of every row.
struct Rendered {
    lines: Vec<Line<'static>>,
    anchors: Vec<(Row, u16, u16)>,
}

impl Rendered {
    fn anchor(&self, row: Row) -> Option<(u16, u16)> {
        self.anchors
            .iter()
            .find(|(r, ..)| *r == row)
            .map(|&(_, line, label)| (line, label))
    }
}

struct Painter<'a> {
    state: &'a FormState,
    theme: &'a Theme,
    focused: Row,
    out: Rendered,
}

impl Painter<'_> {
    fn line(&mut self, line: Line<'static>) {
        self.out.lines.push(line);
    }

    /// Emit a labelled text field, followed by its error message if any.
    fn field(&mut self, row: Row, indent: usize, label: String, value: &str, dragged: bool) {
        let is_focused = self.state.drag().is_none() && row == self.focused;
        let label = format!("{}{}", " ".repeat(indent), label);
        let label_style = if is_focused {
            Style::default()
                .fg(self.theme.highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.text)
        };
        let mut value_style = Style::default().fg(self.theme.text);
        if self.state.error(row).is_some() {
            value_style = value_style.fg(self.theme.error);
        }
        if dragged {
            value_style = value_style.bg(self.theme.selected_bg);
        }
        let placeholder = value.is_empty() && !is_focused;
        let shown = if placeholder { "…" } else { value };

        let line_idx = to_u16(self.out.lines.len());
        self.out
            .anchors
            .push((row, line_idx, to_u16(label.chars().count())));
        self.line(Line::from(vec![
            Span::styled(label, label_style),
            Span::styled(
                shown.to_string(),
                if placeholder {
                    value_style.fg(self.theme.border)
                } else {
                    value_style
                },
            ),
        ]));
        self.error_line(row, indent);
    }

    fn button(&mut self, row: Row, indent: usize, text: &str) {
        let is_focused = self.state.drag().is_none() && row == self.focused;
        let style = if is_focused {
            Style::default()
                .fg(self.theme.text)
                .bg(self.theme.primary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.primary)
        };
        let line_idx = to_u16(self.out.lines.len());
        self.out.anchors.push((row, line_idx, 0));
        self.line(Line::from(vec![
            Span::raw(" ".repeat(indent)),
            Span::styled(format!("[ {text} ]"), style),
        ]));
    }

    fn error_line(&mut self, row: Row, indent: usize) {
        if let Some(error) = self.state.error(row) {
            self.line(Line::styled(
                format!("{}⚠ {}", " ".repeat(indent + 2), error),
                Style::default().fg(self.theme.error),
            ));
        }
    }

    fn question(&mut self, number: usize, question: &Question, dragged: bool) {
        let id = question.id();
        let header_style = if dragged {
            Style::default()
                .fg(self.theme.highlight)
                .bg(self.theme.selected_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.theme.secondary)
        };
        let grip = if dragged { "⇕ " } else { "" };
        self.line(Line::styled(
            format!("{grip}── Question {number} · {} ──", question.kind().label()),
            header_style,
        ));
        self.field(
            Row::Prompt(id),
            2,
            format!("Question {number}: "),
            question.prompt(),
            dragged,
        );
        match question.kind() {
            QuestionKind::Text => {
                let answer = question.answer().unwrap_or_default();
                self.field(Row::Answer(id), 2, "Answer: ".to_string(), answer, dragged);
            }
            kind => {
                let marker = if kind == QuestionKind::SingleChoice {
                    "( )"
                } else {
                    "[ ]"
                };
                for (index, option) in question.options().iter().enumerate() {
                    self.field(
                        Row::Option(id, index),
                        4,
                        format!("{marker} Option {}: ", index + 1),
                        option,
                        dragged,
                    );
                }
                self.button(Row::AddOption(id), 4, "Add Option");
            }
        }
        self.line(Line::default());
    }
}

/// Question indices in the order they are shown, with a drag previewed.
fn display_order(len: usize, drag: Option<Drag>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    if let Some(drag) = drag
        && drag.source < len
        && drag.target < len
    {
        let moved = order.remove(drag.source);
        order.insert(drag.target, moved);
    }
    order
}

fn render_lines(state: &FormState, document: &SurveyDocument, theme: &Theme) -> Rendered {
    let mut painter = Painter {
        state,
        theme,
        focused: state.focused_row(document),
        out: Rendered {
            lines: Vec::new(),
            anchors: Vec::new(),
        },
    };

    painter.field(
        Row::Title,
        0,
        "Survey Title: ".to_string(),
        document.title(),
        false,
    );
    painter.line(Line::default());

    let dragged = state.drag().map(|d| d.question);
    for (number, index) in display_order(document.len(), state.drag())
        .into_iter()
        .enumerate()
    {
        let question = &document.questions()[index];
        painter.question(number + 1, question, dragged == Some(question.id()));
    }

    let pending = document.pending_kind();
    let selector_focused = state.drag().is_none() && painter.focused == Row::KindSelector;
    let choices: Vec<Span<'static>> = QuestionKind::ALL
        .into_iter()
        .flat_map(|kind| {
            let style = if kind == pending {
                let style = Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD);
                if selector_focused {
                    style.bg(theme.selected_bg)
                } else {
                    style
                }
            } else {
                Style::default().fg(theme.border)
            };
            [Span::styled(kind.label(), style), Span::raw("  ")]
        })
        .collect();
    let line_idx = to_u16(painter.out.lines.len());
    painter.out.anchors.push((Row::KindSelector, line_idx, 0));
    let label_style = if selector_focused {
        Style::default()
            .fg(theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text)
    };
    let mut selector = vec![Span::styled("Add a Question: ◀ ", label_style)];
    selector.extend(choices);
    selector.push(Span::styled("▶", label_style));
    painter.line(Line::from(selector));

    painter.out
}

/// Draw the whole form. `scroll` is kept between frames so the focused row
/// stays in view.
pub fn draw_form(
    frame: &mut Frame,
    state: &FormState,
    document: &SurveyDocument,
    theme: &Theme,
    heading: &str,
    scroll: &mut u16,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Heading
            Constraint::Min(5),    // Form content
            Constraint::Length(3), // Submit button
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    let title = Paragraph::new(heading.to_string())
        .style(
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(title, chunks[0]);

    let rendered = render_lines(state, document, theme);
    let form_area = chunks[1];
    let viewport = form_area.height;
    let total = to_u16(rendered.lines.len());

    let focused = state.focused_row(document);
    let focus_line = match state.drag() {
        Some(drag) => question_line(&rendered, document, drag),
        None => rendered.anchor(focused).map(|(line, _)| line),
    };
    if let Some(line) = focus_line {
        if line < *scroll {
            *scroll = line;
        } else if line >= scroll.saturating_add(viewport) {
            *scroll = line.saturating_add(1).saturating_sub(viewport);
        }
    }
    *scroll = (*scroll).min(total.saturating_sub(viewport));

    let content_area = Rect {
        x: form_area.x.saturating_add(1),
        width: form_area.width.saturating_sub(2),
        ..form_area
    };
    let content = Paragraph::new(rendered.lines.clone()).scroll((*scroll, 0));
    frame.render_widget(content, content_area);

    if total > viewport && form_area.width > 0 {
        let scrollbar_area = Rect {
            x: form_area.right().saturating_sub(1),
            width: 1,
            ..form_area
        };
        let mut scrollbar_state = ScrollbarState::new(total as usize)
            .position(*scroll as usize)
            .viewport_content_length(viewport as usize);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("▲"))
            .end_symbol(Some("▼"))
            .track_symbol(Some("│"))
            .thumb_symbol("█");
        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }

    if state.drag().is_none()
        && focused.is_text()
        && let Some((line, label)) = rendered.anchor(focused)
        && line >= *scroll
        && line < scroll.saturating_add(viewport)
    {
        let x = content_area
            .x
            .saturating_add(label)
            .saturating_add(to_u16(state.cursor()));
        if x < content_area.right() {
            frame.set_cursor_position((x, content_area.y.saturating_add(line - *scroll)));
        }
    }

    let submit_focused = state.drag().is_none() && focused == Row::Submit;
    let submit_style = if submit_focused {
        Style::default()
            .fg(theme.text)
            .bg(theme.primary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(theme.primary)
            .add_modifier(Modifier::BOLD)
    };
    let submit_text = if submit_focused {
        "  [ Submit Survey ]  "
    } else {
        "    Submit Survey    "
    };
    let submit_button = Paragraph::new(submit_text)
        .style(submit_style)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(if submit_focused {
                    theme.primary
                } else {
                    theme.border
                })),
        );
    frame.render_widget(submit_button, chunks[2]);

    let status = match state.status() {
        Some(Status::Info(msg)) => Line::styled(msg.clone(), Style::default().fg(theme.success)),
        Some(Status::Error(msg)) => Line::styled(msg.clone(), Style::default().fg(theme.error)),
        None => Line::default(),
    };
    frame.render_widget(Paragraph::new(status), chunks[3]);

    let help = Paragraph::new(HELP).style(Style::default().fg(theme.border));
    frame.render_widget(help, chunks[4]);
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Line of the dragged question's prompt in the previewed order.
fn question_line(rendered: &Rendered, document: &SurveyDocument, drag: Drag) -> Option<u16> {
    document
        .question(drag.question)
        .and_then(|q| rendered.anchor(Row::Prompt(q.id())))
        .map(|(line, _)| line)
}

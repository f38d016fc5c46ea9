//! TUI views and rendering

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap};

use super::state::{AppState, Phase};

/// Main render function
pub fn render(state: &mut AppState, frame: &mut Frame) {
    // Create main layout
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Subject input
            Constraint::Length(3), // Progress
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(state, frame, chunks[0]);
    render_input(state, frame, chunks[1]);
    render_progress(state, frame, chunks[2]);
    render_content(state, frame, chunks[3]);
    render_footer(state, frame, chunks[4]);

    if state.show_help {
        render_help_overlay(frame, chunks[3]);
    }
}

/// Render the header bar
fn render_header(state: &AppState, frame: &mut Frame, area: Rect) {
    let phase_text = match &state.phase {
        Phase::Idle => "Ready",
        Phase::Outline => "Generating outline...",
        Phase::Details { .. } => "Generating notes...",
        Phase::Done => "Done",
        Phase::Failed => "Failed",
    };

    let header = Paragraph::new(vec![Line::from(vec![
        Span::styled("Noter ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(state.model.as_str(), Style::default().fg(Color::DarkGray)),
        Span::raw(" │ "),
        Span::styled(
            phase_text,
            Style::default().fg(match state.phase {
                Phase::Failed => Color::Red,
                Phase::Done => Color::Green,
                _ => Color::Yellow,
            }),
        ),
    ])])
    .block(Block::default().borders(Borders::ALL).title(" Study Notes "));

    frame.render_widget(header, area);
}

/// Render the subject input field
fn render_input(state: &AppState, frame: &mut Frame, area: Rect) {
    let editing = matches!(state.phase, Phase::Idle);

    let mut spans = vec![Span::raw(state.subject_input.as_str())];
    if editing {
        spans.push(Span::styled("█", Style::default().fg(Color::Cyan)));
    }

    let style = if editing {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let input = Paragraph::new(Line::from(spans))
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(" Subject "));

    frame.render_widget(input, area);
}

/// Render the progress gauge and per-heading status
fn render_progress(state: &AppState, frame: &mut Frame, area: Rect) {
    let (ratio, label) = match &state.phase {
        Phase::Idle => {
            let label = state
                .error
                .clone()
                .unwrap_or_else(|| "Type a subject and press Enter".to_string());
            (0.0, label)
        }
        Phase::Outline => (0.0, "Analyzing subject and generating outline...".to_string()),
        Phase::Details { done, total, current } => {
            let label = format!("[{}/{}] Generating notes for: {}", done, total, truncate(current, 48));
            (state.progress(), label)
        }
        Phase::Done => {
            let label = match &state.saved_path {
                Some(path) => format!("Notes saved to {}", path.display()),
                None => "Done".to_string(),
            };
            (1.0, label)
        }
        Phase::Failed => {
            let label = state.error.clone().unwrap_or_else(|| "Generation failed".to_string());
            (0.0, label)
        }
    };

    let gauge_style = match state.phase {
        Phase::Failed => Style::default().fg(Color::Red),
        Phase::Done => Style::default().fg(Color::Green),
        _ => Style::default().fg(Color::Cyan),
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Progress "))
        .gauge_style(gauge_style)
        .ratio(ratio.clamp(0.0, 1.0))
        .label(label);

    frame.render_widget(gauge, area);
}

/// Render the main content area: document, outline, or welcome text
fn render_content(state: &mut AppState, frame: &mut Frame, area: Rect) {
    // Reserve a message pane when there are inline errors to show
    let (content_area, message_area) = if state.section_errors.is_empty() {
        (area, None)
    } else {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(4)])
            .split(area);
        (chunks[0], Some(chunks[1]))
    };

    if let Some(document) = state.document.clone() {
        render_markdown(state, document, " Notes ", frame, content_area);
    } else if let Some(outline) = state.outline.clone() {
        render_markdown(state, outline, " Outline ", frame, content_area);
    } else {
        let welcome = Paragraph::new(vec![
            Line::from(""),
            Line::from("Generate comprehensive study notes for any subject."),
            Line::from(""),
            Line::from("The outline appears here once generated, followed by"),
            Line::from("the assembled document when all sections are done."),
        ])
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
        frame.render_widget(welcome, content_area);
    }

    if let Some(msg_area) = message_area {
        render_messages(state, frame, msg_area);
    }
}

/// Render markdown text with scrolling
fn render_markdown(state: &mut AppState, content: String, title: &str, frame: &mut Frame, area: Rect) {
    let text = tui_markdown::from_str(&content);

    let content_height = text.lines.len() as u16;
    let viewport_height = area.height.saturating_sub(2);
    state.max_scroll = content_height.saturating_sub(viewport_height);
    let scroll = state.scroll.min(state.max_scroll);

    let title = match &state.saved_path {
        Some(path) if state.document.is_some() => format!("{}— {} ", title, path.display()),
        _ => title.to_string(),
    };

    let lines: Vec<Line> = text.lines.iter().cloned().collect();
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}

/// Render inline per-heading failure messages
fn render_messages(state: &AppState, frame: &mut Frame, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = state.section_errors.len().saturating_sub(visible);

    let lines: Vec<Line> = state.section_errors[start..]
        .iter()
        .map(|msg| Line::from(Span::styled(msg.as_str(), Style::default().fg(Color::Red))))
        .collect();

    let messages = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Errors ({}) ", state.section_errors.len())),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(messages, area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);

    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Ctrl+c     ", Style::default().fg(Color::Cyan)),
            Span::raw("Quit (always)"),
        ]),
        Line::from(vec![
            Span::styled("F1, ?      ", Style::default().fg(Color::Cyan)),
            Span::raw("Toggle help"),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled("Subject input", Style::default().add_modifier(Modifier::BOLD))]),
        Line::from(vec![
            Span::styled("Enter      ", Style::default().fg(Color::Cyan)),
            Span::raw("Start generation"),
        ]),
        Line::from(vec![
            Span::styled("Esc        ", Style::default().fg(Color::Cyan)),
            Span::raw("Quit"),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled("After a run", Style::default().add_modifier(Modifier::BOLD))]),
        Line::from(vec![
            Span::styled("j/k, ↑/↓   ", Style::default().fg(Color::Cyan)),
            Span::raw("Scroll document"),
        ]),
        Line::from(vec![
            Span::styled("g/G        ", Style::default().fg(Color::Cyan)),
            Span::raw("Jump to top / bottom"),
        ]),
        Line::from(vec![
            Span::styled("s          ", Style::default().fg(Color::Cyan)),
            Span::raw("Save the document again"),
        ]),
        Line::from(vec![
            Span::styled("n          ", Style::default().fg(Color::Cyan)),
            Span::raw("New subject"),
        ]),
        Line::from(vec![
            Span::styled("q          ", Style::default().fg(Color::Cyan)),
            Span::raw("Quit"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "A running generation cannot be cancelled.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .style(Style::default().bg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(help, popup_area);
}

/// Render the footer bar
fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    let spans = if matches!(state.phase, Phase::Idle) {
        vec![
            Span::styled(" Enter", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" Generate "),
            Span::styled(" F1", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" Help "),
            Span::styled(" Esc", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" Quit "),
        ]
    } else if state.is_running() {
        vec![
            Span::styled(" Ctrl+c", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" Quit "),
            Span::styled(" (generation cannot be cancelled)", Style::default().fg(Color::DarkGray)),
        ]
    } else {
        vec![
            Span::styled(" j/k", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" Scroll "),
            Span::styled(" s", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" Save "),
            Span::styled(" n", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" New subject "),
            Span::styled(" ?", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" Help "),
            Span::styled(" q", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" Quit "),
        ]
    };

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}

/// Truncate a label to fit a status line
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max).collect();
        format!("{}…", cut)
    }
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

// SPDX-License-Identifier: GPL-3.0-only

use std::sync::Arc;

use iced::keyboard::key::Named;
use iced::keyboard::{self, Key};
use iced::widget::{
    Column, Row, Rule, Space, button, center, column, container, row, scrollable, text,
    text_input,
};
use iced::{Alignment, Element, Length, Subscription, Task, event};

use pagewise_core::catalog::{self, Entry};
use pagewise_core::settings::Settings;
use pagewise_utils::pagination::{PaginationAction, Paginator};
use pagewise_utils::styling::{
    GLOBAL_BUTTON_HEIGHT, GLOBAL_SPACING, LIST_WIDTH, TEXT_SIZE, TITLE_TEXT_SIZE,
};

use crate::fl;

pub struct Pagewise {
    paginator: Paginator,
    jump_input: String,
    state: State,
}

enum State {
    Loading,
    Failed(String),
    Ready { entries: Arc<Vec<Entry>> },
}

#[derive(Debug, Clone)]
pub enum Message {
    /// Callback after loading the catalog
    Loaded(Result<Arc<Vec<Entry>>, anywho::Error>),

    /// Try to move to another page
    PaginationAction(PaginationAction),

    /// Callback when using the jump to page text input
    JumpInputUpdate(String),
    /// Jumps to the page typed on the text input
    SubmitJump,
}

impl Pagewise {
    pub fn new(settings: Settings) -> (Self, Task<Message>) {
        let mut paginator = Paginator::with_config(settings.pagination);
        paginator.subscribe(|index| log::debug!("showing page {index}"));

        (
            Self {
                paginator,
                jump_input: String::new(),
                state: State::Loading,
            },
            Task::perform(
                catalog::load(settings.source, settings.sample_size),
                Message::Loaded,
            ),
        )
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Loaded(res) => match res {
                Ok(entries) => {
                    log::info!("browsing {} entries", entries.len());
                    self.state = State::Ready { entries };
                }
                Err(err) => {
                    log::error!("{err}");
                    self.state = State::Failed(err.to_string());
                }
            },
            Message::PaginationAction(pagination_action) => {
                if let State::Ready { entries } = &self.state {
                    self.paginator.apply(pagination_action, entries.as_slice());
                }
            }
            Message::JumpInputUpdate(value) => {
                if value.chars().all(|c| c.is_ascii_digit()) {
                    self.jump_input = value;
                }
            }
            Message::SubmitJump => {
                let Ok(page_number) = self.jump_input.parse::<i64>() else {
                    return Task::none();
                };

                self.jump_input.clear();
                return self.update(Message::PaginationAction(PaginationAction::Jump(
                    page_number,
                )));
            }
        }

        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        match &self.state {
            State::Loading => center(text(fl!("loading"))).into(),
            State::Failed(err) => center(
                column![text(fl!("load-failed")).size(TITLE_TEXT_SIZE), text(err)]
                    .spacing(GLOBAL_SPACING)
                    .align_x(Alignment::Center),
            )
            .into(),
            State::Ready { entries } => list_screen(&self.paginator, &self.jump_input, entries),
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        event::listen_with(handle_event)
    }
}

//
// SUBSCRIPTION HANDLING
//

fn handle_event(event: event::Event, status: event::Status, _: iced::window::Id) -> Option<Message> {
    // Arrows typed inside the jump input belong to the input
    if status == event::Status::Captured {
        return None;
    }

    match event {
        event::Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => {
            let action = match key {
                Key::Named(Named::ArrowLeft) => PaginationAction::Back,
                Key::Named(Named::ArrowRight) => PaginationAction::Forward,
                Key::Named(Named::Home) => PaginationAction::First,
                Key::Named(Named::End) => PaginationAction::Last,
                _ => return None,
            };
            Some(Message::PaginationAction(action))
        }
        _ => None,
    }
}

//
// VIEW COMPOSING
//

fn list_screen<'a>(
    paginator: &'a Paginator,
    jump_input: &'a str,
    entries: &'a [Entry],
) -> Element<'a, Message> {
    let page = paginator.paginate(entries);

    let header = row![
        text(fl!("entries")).size(TITLE_TEXT_SIZE),
        Space::new(Length::Fill, Length::Shrink),
        text(fl!("page-of", page = page.page, total = page.total_pages)).size(TEXT_SIZE),
    ]
    .align_y(Alignment::Center)
    .spacing(GLOBAL_SPACING)
    .padding(3.);

    let grid: Element<'a, Message> = if page.paginated.is_empty() {
        container(text(fl!("no-entries")).size(TITLE_TEXT_SIZE))
            .width(Length::Fill)
            .align_x(Alignment::Center)
            .padding(50.)
            .into()
    } else {
        let title_row = Row::new()
            .push(text(fl!("position")).size(TITLE_TEXT_SIZE).width(100.))
            .push(text(fl!("name")).size(TITLE_TEXT_SIZE).width(700.))
            .align_y(Alignment::Center);

        let mut grid = Column::new()
            .push(title_row)
            .spacing(GLOBAL_SPACING)
            .width(Length::Shrink);

        for entry in page.paginated {
            let row = Row::new()
                .push(text(entry.position.to_string()).size(TEXT_SIZE).width(100.))
                .push(text(&entry.label).size(TEXT_SIZE).width(700.))
                .align_y(Alignment::Center);

            // Limit Rule size to sum of all column widths
            grid = grid.push(row![Rule::horizontal(1.)].width(LIST_WIDTH));
            grid = grid.push(row);
        }

        scrollable(grid).height(Length::Fill).into()
    };

    let item_range = page.item_range();
    let showing = if item_range.is_empty() {
        String::new()
    } else {
        fl!(
            "showing",
            from = item_range.start + 1,
            to = item_range.end,
            count = entries.len()
        )
    };

    let nav_button = |label: String, action: PaginationAction, enabled: bool| -> Element<'a, Message> {
        button(
            text(label)
                .center()
                .width(Length::Fill)
                .height(GLOBAL_BUTTON_HEIGHT),
        )
        .on_press_maybe(enabled.then_some(Message::PaginationAction(action)))
        .width(Length::Fill)
        .into()
    };

    let jump_row = row![
        text_input(fl!("page-number").as_str(), jump_input)
            .on_input(Message::JumpInputUpdate)
            .on_submit(Message::SubmitJump)
            .size(TEXT_SIZE)
            .width(200.),
        button(text(fl!("go")).center().height(GLOBAL_BUTTON_HEIGHT))
            .on_press_maybe((!jump_input.is_empty()).then_some(Message::SubmitJump)),
    ]
    .align_y(Alignment::Center)
    .spacing(GLOBAL_SPACING);

    let page_controls = Column::new()
        .push(row![Rule::horizontal(1.)].width(LIST_WIDTH))
        .push(text(showing).align_x(Alignment::Center))
        .push(
            Row::new()
                .width(LIST_WIDTH)
                .push(nav_button(
                    fl!("first"),
                    PaginationAction::First,
                    page.has_previous(),
                ))
                .push(nav_button(
                    fl!("back"),
                    PaginationAction::Back,
                    page.has_previous(),
                ))
                .push(nav_button(
                    fl!("next"),
                    PaginationAction::Forward,
                    page.has_next(),
                ))
                .push(nav_button(
                    fl!("last"),
                    PaginationAction::Last,
                    page.has_next(),
                ))
                .align_y(Alignment::Center)
                .spacing(GLOBAL_SPACING),
        )
        .push(jump_row)
        .spacing(GLOBAL_SPACING)
        .align_x(Alignment::Center);

    let content = container(
        column![header, grid, page_controls]
            .spacing(GLOBAL_SPACING)
            .width(LIST_WIDTH),
    )
    .width(Length::Fill)
    .align_x(Alignment::Center)
    .padding(50.);

    content.height(Length::Fill).into()
}

use std::collections::HashSet;

use iced::widget::{
    button, center, column, container, keyed_column, row, scrollable, text, text_input,
};
use iced::Length::Fill;
use iced::{window, Element, Length, Size, Task};
use rfd::{AsyncMessageDialog, MessageButtons, MessageDialogResult, MessageLevel};
use tracing::{error, info};
use uuid::Uuid;

use playlist_manager::api::Api;
use playlist_manager::artist::{ArtistMessage, PendingArtists};
use playlist_manager::track::{Track, TrackMessage};

fn main() -> iced::Result {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "playlist_manager=info".into()),
        )
        .init();

    let api = match Api::from_env() {
        Ok(api) => api,
        Err(err) => {
            error!(%err, "invalid server configuration");
            std::process::exit(1);
        }
    };
    info!(base_url = api.base_url(), "starting playlist manager");

    iced::application(Manager::title, Manager::update, Manager::view)
        .window(window::Settings {
            size: Size::new(960.0, 640.0),
            ..Default::default()
        })
        .run_with(move || Manager::new(api.clone()))
}

struct Manager {
    api: Api,
    catalog: Vec<Track>,
    liked: Vec<Track>,
    selected: HashSet<String>,
    artists: PendingArtists,
    artist_input: String,
    playlist_input: String,
}

#[derive(Debug, Clone)]
enum Message {
    CatalogLoaded(Result<Vec<Track>, String>),
    LikedLoaded(Result<Vec<Track>, String>),

    CatalogTrack(usize, TrackMessage),
    LikedTrack(usize, TrackMessage),
    DeselectAll,

    ArtistInput(String),
    AddArtist,
    Artist(Uuid, ArtistMessage),

    RemoveSelected,
    RemoveSelectedConfirmed(bool),
    SelectedRemoved(Result<(), String>),
    SingleRemoved(Result<(), String>),

    PlaylistInput(String),
    CreatePlaylist,
    PlaylistCreated(Result<(), String>),
}

impl Manager {
    fn new(api: Api) -> (Self, Task<Message>) {
        let load = Task::batch([fetch_catalog(api.clone()), fetch_liked(api.clone())]);

        (Self::with_api(api), load)
    }

    fn with_api(api: Api) -> Self {
        Manager {
            api,
            catalog: vec![],
            liked: vec![],
            selected: HashSet::new(),
            artists: PendingArtists::default(),
            artist_input: String::new(),
            playlist_input: String::new(),
        }
    }

    fn title(&self) -> String {
        "Playlist Manager".to_string()
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::CatalogLoaded(Ok(tracks)) => {
                info!(count = tracks.len(), "track catalog loaded");
                self.catalog = tracks;
                // Rows are rebuilt from scratch, so checkmarks go with them.
                self.selected.clear();

                Task::none()
            }
            Message::CatalogLoaded(Err(err)) => {
                error!(%err, "failed to load the track catalog");

                alert("Failed to load the track list.")
            }
            Message::LikedLoaded(Ok(tracks)) => {
                info!(count = tracks.len(), "liked tracks loaded");
                self.liked = tracks;

                Task::none()
            }
            Message::LikedLoaded(Err(err)) => {
                error!(%err, "failed to load liked tracks");

                alert("Failed to load liked tracks.")
            }
            Message::CatalogTrack(i, TrackMessage::Toggled(checked)) => {
                if let Some(track) = self.catalog.get(i) {
                    if checked {
                        self.selected.insert(track.id.clone());
                    } else {
                        self.selected.remove(&track.id);
                    }
                }

                Task::none()
            }
            Message::CatalogTrack(_, _) => Task::none(),
            Message::LikedTrack(i, TrackMessage::Remove) => {
                if let Some(track) = self.liked.get(i) {
                    let api = self.api.clone();
                    let id = track.id.clone();

                    Task::perform(
                        async move { api.remove_liked_tracks(&[id]).await.map_err(|e| e.to_string()) },
                        Message::SingleRemoved,
                    )
                } else {
                    Task::none()
                }
            }
            Message::LikedTrack(_, _) => Task::none(),
            Message::DeselectAll => {
                self.selected.clear();

                Task::none()
            }

            Message::ArtistInput(value) => {
                self.artist_input = value;

                Task::none()
            }
            Message::AddArtist => {
                if self.artists.add(&self.artist_input) {
                    self.artist_input.clear();

                    Task::none()
                } else {
                    alert("Please enter an artist name.")
                }
            }
            Message::Artist(id, ArtistMessage::Remove) => {
                self.artists.remove(id);

                Task::none()
            }

            Message::RemoveSelected => match self.removal_request() {
                Some(ids) => confirm_removal(ids.len()),
                None => alert("No tracks selected."),
            },
            Message::RemoveSelectedConfirmed(false) => Task::none(),
            Message::RemoveSelectedConfirmed(true) => {
                let Some(ids) = self.removal_request() else {
                    return Task::none();
                };
                let api = self.api.clone();

                Task::perform(
                    async move { api.remove_liked_tracks(&ids).await.map_err(|e| e.to_string()) },
                    Message::SelectedRemoved,
                )
            }
            Message::SelectedRemoved(Ok(())) => fetch_catalog(self.api.clone()),
            Message::SelectedRemoved(Err(err)) => {
                error!(%err, "failed to remove selected tracks");

                alert("Failed to remove the selected tracks.")
            }
            Message::SingleRemoved(Ok(())) => Task::batch([
                alert("Track removed."),
                fetch_liked(self.api.clone()),
            ]),
            Message::SingleRemoved(Err(err)) => {
                error!(%err, "failed to remove track");

                alert("Failed to remove the track.")
            }

            Message::PlaylistInput(value) => {
                self.playlist_input = value;

                Task::none()
            }
            Message::CreatePlaylist => {
                let (name, artist_names) = match self.playlist_request() {
                    Ok(form) => form,
                    Err(reason) => return alert(reason),
                };
                let api = self.api.clone();

                Task::perform(
                    async move {
                        api.create_playlist(&name, &artist_names)
                            .await
                            .map_err(|e| e.to_string())
                    },
                    Message::PlaylistCreated,
                )
            }
            Message::PlaylistCreated(Ok(())) => {
                info!("playlist created");
                self.playlist_input.clear();
                self.artists.clear();

                alert("Playlist created.")
            }
            Message::PlaylistCreated(Err(err)) => {
                error!(%err, "failed to create playlist");

                alert("Failed to create the playlist.")
            }
        }
    }

    /// Ids of the checked catalog rows, in catalog order. `None` when
    /// nothing is checked, in which case no request goes out.
    fn removal_request(&self) -> Option<Vec<String>> {
        let ids: Vec<String> = self
            .catalog
            .iter()
            .filter(|track| self.selected.contains(&track.id))
            .map(|track| track.id.clone())
            .collect();

        if ids.is_empty() {
            None
        } else {
            Some(ids)
        }
    }

    /// The create-playlist form, or the validation message to show instead.
    /// Both fields must be non-empty before any request goes out.
    fn playlist_request(&self) -> Result<(String, String), &'static str> {
        let name = self.playlist_input.trim();
        if name.is_empty() {
            return Err("Please enter a playlist name.");
        }

        if self.artists.is_empty() {
            return Err("Please add at least one artist to the playlist.");
        }

        Ok((name.to_string(), self.artists.names()))
    }

    fn view(&self) -> Element<Message> {
        let catalog: Element<_> = if self.catalog.is_empty() {
            center(text("No tracks").width(Fill).size(20).color([0.7, 0.7, 0.7]))
                .height(200)
                .into()
        } else {
            scrollable(
                column(self.catalog.iter().enumerate().map(|(i, track)| {
                    track
                        .catalog_row(self.selected.contains(&track.id))
                        .map(move |message| Message::CatalogTrack(i, message))
                }))
                .spacing(10),
            )
            .height(Fill)
            .into()
        };

        let library = column![
            text("All tracks").size(22),
            catalog,
            row![
                button("Deselect all").on_press(Message::DeselectAll),
                button("Remove selected").on_press(Message::RemoveSelected),
            ]
            .spacing(10),
        ]
        .spacing(10);

        let liked: Element<_> = if self.liked.is_empty() {
            center(text("No liked tracks").width(Fill).size(20).color([0.7, 0.7, 0.7]))
                .height(200)
                .into()
        } else {
            scrollable(
                column(self.liked.iter().enumerate().map(|(i, track)| {
                    track
                        .liked_row()
                        .map(move |message| Message::LikedTrack(i, message))
                }))
                .spacing(10),
            )
            .height(Fill)
            .into()
        };

        let liked_panel = column![text("Liked tracks").size(22), liked].spacing(10);

        let chips: Element<_> = keyed_column(self.artists.iter().map(|entry| {
            let id = entry.id;

            (
                id,
                entry.view().map(move |message| Message::Artist(id, message)),
            )
        }))
        .spacing(10)
        .into();

        let builder = column![
            text("New playlist").size(22),
            text_input("Playlist name", &self.playlist_input).on_input(Message::PlaylistInput),
            row![
                text_input("Artist name", &self.artist_input)
                    .on_input(Message::ArtistInput)
                    .on_submit(Message::AddArtist),
                button("Add").on_press(Message::AddArtist),
            ]
            .spacing(10),
            chips,
            button("Create playlist").on_press(Message::CreatePlaylist),
        ]
        .spacing(10);

        let content = row![
            container(library).width(Length::FillPortion(3)),
            column![liked_panel, builder]
                .spacing(20)
                .width(Length::FillPortion(2)),
        ]
        .spacing(20)
        .padding([10, 20]);

        container(content).width(Fill).height(Fill).into()
    }
}

fn fetch_catalog(api: Api) -> Task<Message> {
    Task::perform(
        async move { api.update_tracks().await.map_err(|e| e.to_string()) },
        Message::CatalogLoaded,
    )
}

fn fetch_liked(api: Api) -> Task<Message> {
    Task::perform(
        async move { api.liked_tracks().await.map_err(|e| e.to_string()) },
        Message::LikedLoaded,
    )
}

/// Blocking notification, the desktop stand-in for `alert()`.
fn alert(message: &str) -> Task<Message> {
    let message = message.to_string();

    Task::perform(
        async move {
            AsyncMessageDialog::new()
                .set_level(MessageLevel::Warning)
                .set_title("Playlist Manager")
                .set_description(message)
                .show()
                .await;
        },
        |_| (),
    )
    .discard()
}

/// Ok/Cancel confirmation before a bulk removal.
fn confirm_removal(count: usize) -> Task<Message> {
    Task::perform(
        async move {
            let result = AsyncMessageDialog::new()
                .set_level(MessageLevel::Warning)
                .set_title("Playlist Manager")
                .set_description(format!("Remove {count} selected track(s)?"))
                .set_buttons(MessageButtons::OkCancel)
                .show()
                .await;

            matches!(result, MessageDialogResult::Ok)
        },
        Message::RemoveSelectedConfirmed,
    )
}

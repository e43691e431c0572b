use iced::widget::{button, row, text};
use iced::{Element, Length};
use uuid::Uuid;

/// One entry in the pending artist list. The uuid only gives the rendered
/// chip a stable identity; the server never sees it.
#[derive(Debug, Clone)]
pub struct ArtistEntry {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone)]
pub enum ArtistMessage {
    Remove,
}

impl ArtistEntry {
    pub fn view(&self) -> Element<ArtistMessage> {
        let name = text(self.name.clone()).width(Length::FillPortion(5));

        let remove = button("Remove").on_press(ArtistMessage::Remove);

        row![name, remove].spacing(10).into()
    }
}

/// The unsaved artist list assembled before playlist creation.
///
/// The chip list on screen is a projection of this collection, and the
/// comma-joined `artist_names` field is recomputed from it on demand
/// rather than stored anywhere.
#[derive(Debug, Default)]
pub struct PendingArtists {
    entries: Vec<ArtistEntry>,
}

impl PendingArtists {
    /// Append a name, stripping surrounding whitespace. A blank name is
    /// rejected. Duplicates are allowed.
    pub fn add(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }

        self.entries.push(ArtistEntry {
            id: Uuid::new_v4(),
            name: name.to_string(),
        });
        true
    }

    pub fn remove(&mut self, id: Uuid) {
        self.entries.retain(|entry| entry.id != id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The serialized `artist_names` field.
    pub fn names(&self) -> String {
        self.entries
            .iter()
            .map(|entry| entry.name.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArtistEntry> {
        self.entries.iter()
    }
}

use iced::widget::{button, checkbox, row, text};
use iced::{Element, Length};
use serde::{Deserialize, Serialize};

/// A track as the server reports it. The id is opaque to the client and
/// only ever echoed back in removal requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artist: String,
}

/// Envelope of the catalog endpoint: `{ "tracks": [...] }`.
#[derive(Debug, Deserialize)]
pub struct TracksResponse {
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone)]
pub enum TrackMessage {
    Toggled(bool),
    Remove,
}

impl Track {
    pub fn label(&self) -> String {
        format!("{} - {}", self.name, self.artist)
    }

    /// Catalog row: a checkbox feeding the selection set.
    pub fn catalog_row(&self, checked: bool) -> Element<TrackMessage> {
        checkbox(self.label(), checked)
            .on_toggle(TrackMessage::Toggled)
            .width(Length::Fill)
            .into()
    }

    /// Liked row: the label plus a removal button.
    pub fn liked_row(&self) -> Element<TrackMessage> {
        let label = text(self.label()).width(Length::FillPortion(6));

        let remove = button("Remove").on_press(TrackMessage::Remove);

        row![label, remove].spacing(10).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_is_name_dash_artist() {
        let track = Track {
            id: "4uLU6hMCjMI75M1A2tKUQC".to_string(),
            name: "Feeling Good".to_string(),
            artist: "Nina Simone".to_string(),
        };

        assert_eq!(track.label(), "Feeling Good - Nina Simone");
    }

    #[test]
    fn catalog_envelope_decodes() {
        let body = r#"{"tracks":[{"id":"a1","name":"One","artist":"A"},{"id":"b2","name":"Two","artist":"B"}]}"#;

        let response: TracksResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.tracks.len(), 2);
        assert_eq!(response.tracks[0].id, "a1");
        assert_eq!(response.tracks[1].artist, "B");
    }

    #[test]
    fn liked_list_decodes_as_bare_array() {
        let body = r#"[{"id":"a1","name":"One","artist":"A"}]"#;

        let tracks: Vec<Track> = serde_json::from_str(body).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].name, "One");
    }
}

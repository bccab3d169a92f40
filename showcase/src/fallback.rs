//! Embedded repository list shown whenever live data is unavailable.

use crate::config::DEFAULT_HANDLE;
use crate::types::RepositoryDescriptor;

struct FallbackEntry {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    language: &'static str,
    color: &'static str,
    stars: u64,
    forks: u64,
    size: u64,
}

const FALLBACK_ENTRIES: [FallbackEntry; 6] = [
    FallbackEntry {
        id: "google-store-locator",
        name: "Google-Store-Locator",
        description: "A single page web-app which shows real-time stores in nearby area sorted by distance. Developed with NodeJS, MongoDB & GoogleMapsAPI. MongoDB being the storage for sorting Geo-JSON.",
        language: "JavaScript",
        color: "#f1e05a",
        stars: 2,
        forks: 0,
        size: 22806,
    },
    FallbackEntry {
        id: "instagram-reactjs-clone",
        name: "Instagram-ReactJS-Clone",
        description: "A full stack, Instagram CLONE using ReactJS, Firebase & Material-UI. Deployed a React app with Firebase Hosting, Handled authentication with Firebase.",
        language: "JavaScript",
        color: "#f1e05a",
        stars: 1,
        forks: 0,
        size: 37375,
    },
    FallbackEntry {
        id: "spotify-reactjs-clone",
        name: "Spotify-ReactJS-Clone",
        description: "A full stack, Spotify CLONE using ReactJS, Firebase & Material-UI. Handled authentication with Spotify's Native AUth. Fetches Real-time playlists and the song playing & embedded with clean multimed...",
        language: "JavaScript",
        color: "#f1e05a",
        stars: 5,
        forks: 3,
        size: 3689,
    },
    FallbackEntry {
        id: "orchestration-api",
        name: "Orchestration-API",
        description: "A web interface for reducing manual ADF work of 2 hours to 10 minutes. Handled authentication with Azure's Native AUth. Collects real-time information through user and deploy entire ADF on the fly ...",
        language: "CSS",
        color: "#563d7c",
        stars: 1,
        forks: 1,
        size: 3689,
    },
    FallbackEntry {
        id: "sudokuvizualizationbacktracking",
        name: "SudokuVizualizationBacktracking",
        description: "This is a sudoku solver using the backtracking algorithm. It includes a graphical GUI as well as a text based version.",
        language: "Python",
        color: "#3572A5",
        stars: 5,
        forks: 0,
        size: 3689,
    },
    FallbackEntry {
        id: "amazon-reactjs-clone",
        name: "Amazon-ReactJS-Clone",
        description: "Amazon e-commerce website clone. Frontend in ReactJS, ContextAPI, Firebase Authentication for SignUp/SignIn. Deployed a React app with Firebase Hosting. Payment Gateway (stripe) is yet to be implem...",
        language: "JavaScript",
        color: "#f1e05a",
        stars: 0,
        forks: 0,
        size: 21083,
    },
];

/// The six fallback repositories, in display order.
///
/// The links always point at the default showcased account regardless of the
/// handle that was requested.
pub fn fallback_repositories() -> Vec<RepositoryDescriptor> {
    FALLBACK_ENTRIES
        .iter()
        .map(|entry| {
            RepositoryDescriptor::new(DEFAULT_HANDLE, entry.name)
                .with_id(entry.id)
                .with_description(Some(entry.description.to_string()))
                .with_language(
                    Some(entry.language.to_string()),
                    Some(entry.color.to_string()),
                )
                .with_counts(entry.stars, entry.forks)
                .with_size(entry.size)
        })
        .collect()
}

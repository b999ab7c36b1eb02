// Deterministic construction of the two Google Maps links derived from one
// extracted query.

const INTERACTIVE_BASE: &str = "https://www.google.com/maps/search/?api=1&query=";
const EMBED_BASE: &str = "https://www.google.com/maps/embed/v1/search";

pub struct MapLinks {
    pub interactive: String,
    pub embed_iframe: String,
}

pub fn build_links(query: &str, maps_api_key: &str) -> MapLinks {
    let encoded = urlencoding::encode(query);
    MapLinks {
        interactive: format!("{INTERACTIVE_BASE}{encoded}"),
        embed_iframe: format!("{EMBED_BASE}?key={maps_api_key}&q={encoded}"),
    }
}

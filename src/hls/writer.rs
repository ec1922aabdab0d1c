//! HLS master-playlist serializer.
//!
//! `Alternative`s are stored denormalized (one copy per referencing
//! `Variant`, per [`super::model`]'s doc comment), but a real master
//! playlist declares each `EXT-X-MEDIA` group once and has every
//! `EXT-X-STREAM-INF` reference it by `GROUP-ID`. This writer collapses
//! duplicate alternatives (identical rendered line) back down to one
//! `EXT-X-MEDIA` tag, in first-seen order, before the variant tags.

use super::model::MasterPlaylist;

pub fn write(playlist: &MasterPlaylist) -> String {
    let mut out = String::new();

    for line in &playlist.preamble {
        out.push_str(line);
        out.push('\n');
    }

    let mut seen_alternatives = Vec::new();
    for variant in &playlist.variants {
        for alternative in &variant.alternatives {
            let line = alternative.to_line();
            if !seen_alternatives.contains(&line) {
                seen_alternatives.push(line);
            }
        }
    }
    for line in &seen_alternatives {
        out.push_str(line);
        out.push('\n');
    }

    for variant in &playlist.variants {
        out.push_str(&variant.stream_inf_line());
        out.push('\n');
        out.push_str(&variant.uri);
        out.push('\n');
    }

    out
}

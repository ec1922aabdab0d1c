//! HLS master-playlist parser.
//!
//! `EXT-X-MEDIA` alternatives are attached onto each `Variant` that
//! references their group, rather than kept as one flat list. Every tag
//! this parser doesn't need to filter on (`EXT-X-VERSION`,
//! `EXT-X-INDEPENDENT-SEGMENTS`, comments, ...) is kept verbatim as a
//! preamble line rather than modeled.

use crate::errors::AppError;

use super::model::{Alternative, AttributeList, MasterPlaylist, Variant};

/// The `EXT-X-MEDIA` group-reference attribute a variant carries for each
/// alternative-rendition kind, paired with the `TYPE` value that
/// `EXT-X-MEDIA` tags in that group declare.
const GROUP_REFERENCES: [(&str, &str); 4] = [
    ("AUDIO", "AUDIO"),
    ("VIDEO", "VIDEO"),
    ("SUBTITLES", "SUBTITLES"),
    ("CLOSED-CAPTIONS", "CLOSED-CAPTIONS"),
];

/// Parse `content` as an HLS master playlist.
///
/// Returns [`AppError::ManifestType`] if the input looks like a rendition
/// (media) playlist instead of a master one, and
/// [`AppError::ManifestParse`] if it contains no `EXT-X-STREAM-INF` tags at
/// all or a `EXT-X-STREAM-INF` tag is not followed by a URI line.
pub fn parse(content: &str) -> Result<MasterPlaylist, AppError> {
    let mut preamble = Vec::new();
    let mut variants: Vec<Variant> = Vec::new();
    let mut media_tags: Vec<Alternative> = Vec::new();
    let mut saw_stream_inf = false;
    let mut saw_rendition_marker = false;

    let mut lines = content.lines();
    while let Some(line) = lines.next() {
        if let Some(rest) = line.strip_prefix("#EXT-X-STREAM-INF:") {
            saw_stream_inf = true;
            let attributes = AttributeList::parse(rest);
            let uri = next_non_blank(&mut lines)
                .ok_or_else(|| AppError::manifest_parse("EXT-X-STREAM-INF without a following URI"))?;
            variants.push(Variant {
                attributes,
                uri,
                alternatives: Vec::new(),
            });
        } else if let Some(rest) = line.strip_prefix("#EXT-X-MEDIA:") {
            media_tags.push(Alternative {
                attributes: AttributeList::parse(rest),
            });
        } else if line.starts_with("#EXTINF:") || line.starts_with("#EXT-X-TARGETDURATION:") {
            saw_rendition_marker = true;
            preamble.push(line.to_string());
        } else {
            preamble.push(line.to_string());
        }
    }

    if saw_rendition_marker && !saw_stream_inf {
        return Err(AppError::ManifestType);
    }
    if !saw_stream_inf {
        return Err(AppError::manifest_parse("not a valid master playlist"));
    }

    for variant in &mut variants {
        for (group_attr, media_type) in GROUP_REFERENCES {
            let Some(group_id) = variant.attributes.get_unquoted(group_attr) else {
                continue;
            };
            if group_id == "NONE" {
                continue;
            }
            for media in &media_tags {
                if media.group_id().as_deref() == Some(group_id.as_str())
                    && media.media_type().as_deref() == Some(media_type)
                {
                    variant.alternatives.push(media.clone());
                }
            }
        }
    }

    Ok(MasterPlaylist { preamble, variants })
}

fn next_non_blank<'a>(lines: &mut impl Iterator<Item = &'a str>) -> Option<String> {
    for line in lines {
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }
    None
}

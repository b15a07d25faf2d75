//! Raster image recovery from the PDF object graph.
//!
//! Pages reference their raster content as image XObjects. This module walks
//! a page's resource dictionary (honoring inheritance through the page tree)
//! and decodes each image stream into a [`DynamicImage`] for barcode
//! scanning.

use image::{DynamicImage, ImageBuffer, Rgba};
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::trace;

/// Collect every decodable raster image referenced by a page.
pub(crate) fn page_images(doc: &Document, page_id: ObjectId) -> Vec<DynamicImage> {
    let mut found = Vec::new();

    let Some(resources) = page_resources(doc, page_id) else {
        return found;
    };
    let Ok(xobjects) = resources.get(b"XObject") else {
        return found;
    };

    if let Ok((_, Object::Dictionary(xobjects))) = doc.dereference(xobjects) {
        for (_name, entry) in xobjects.iter() {
            if let Ok((_, object)) = doc.dereference(entry) {
                if let Some(img) = image_from_object(doc, object) {
                    found.push(img);
                }
            }
        }
    }

    found
}

/// Resolve a page's resource dictionary, walking up the page tree for
/// inherited entries.
fn page_resources(doc: &Document, page_id: ObjectId) -> Option<Dictionary> {
    let mut node_id = page_id;
    loop {
        let Ok(Object::Dictionary(dict)) = doc.get_object(node_id) else {
            return None;
        };

        if let Ok(resources) = dict.get(b"Resources") {
            if let Ok((_, Object::Dictionary(resources))) = doc.dereference(resources) {
                return Some(resources.clone());
            }
        }

        match dict.get(b"Parent") {
            Ok(Object::Reference(parent_id)) => node_id = *parent_id,
            _ => return None,
        }
    }
}

fn image_from_object(doc: &Document, object: &Object) -> Option<DynamicImage> {
    let Object::Stream(stream) = object else {
        return None;
    };
    let dict = &stream.dict;

    if dict.get(b"Subtype").ok()?.as_name().ok()? != b"Image" {
        return None;
    }

    let width = dict.get(b"Width").ok()?.as_i64().ok()? as u32;
    let height = dict.get(b"Height").ok()?.as_i64().ok()? as u32;
    trace!("image XObject: {}x{}", width, height);

    if let Some(filter) = primary_filter(dict) {
        match filter {
            b"DCTDecode" => {
                // the stream content is a complete JPEG
                return image::load_from_memory_with_format(
                    &stream.content,
                    image::ImageFormat::Jpeg,
                )
                .ok();
            }
            b"JPXDecode" | b"CCITTFaxDecode" | b"JBIG2Decode" => {
                trace!(
                    "unsupported image filter {}",
                    String::from_utf8_lossy(filter)
                );
                return None;
            }
            _ => {}
        }
    }

    let data = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());

    let bits = dict
        .get(b"BitsPerComponent")
        .ok()
        .and_then(|object| object.as_i64().ok())
        .unwrap_or(8) as u8;

    image_from_raw(&data, width, height, color_space(doc, dict), bits)
}

fn primary_filter(dict: &Dictionary) -> Option<&[u8]> {
    match dict.get(b"Filter").ok()? {
        Object::Name(name) => Some(name.as_slice()),
        Object::Array(filters) => filters.first()?.as_name().ok(),
        _ => None,
    }
}

fn color_space<'a>(doc: &'a Document, dict: &'a Dictionary) -> &'a [u8] {
    dict.get(b"ColorSpace")
        .ok()
        .and_then(|object| match object {
            Object::Name(name) => Some(name.as_slice()),
            Object::Array(parts) => parts.first().and_then(|part| part.as_name().ok()),
            Object::Reference(id) => doc
                .get_object(*id)
                .ok()
                .and_then(|resolved| resolved.as_name().ok()),
            _ => None,
        })
        .unwrap_or(b"DeviceRGB")
}

fn image_from_raw(
    data: &[u8],
    width: u32,
    height: u32,
    color_space: &[u8],
    bits_per_component: u8,
) -> Option<DynamicImage> {
    if bits_per_component != 8 {
        trace!("unsupported bits per component: {}", bits_per_component);
        return None;
    }

    let pixels = (width as usize) * (height as usize);
    let mut rgba = Vec::with_capacity(pixels * 4);

    match color_space {
        b"DeviceRGB" | b"RGB" | b"CalRGB" => {
            let needed = pixels * 3;
            if data.len() < needed {
                trace!("RGB data too short: {} < {}", data.len(), needed);
                return None;
            }
            for px in data[..needed].chunks_exact(3) {
                rgba.extend_from_slice(px);
                rgba.push(255);
            }
        }
        b"DeviceGray" | b"G" | b"CalGray" => {
            if data.len() < pixels {
                trace!("gray data too short: {} < {}", data.len(), pixels);
                return None;
            }
            for &gray in &data[..pixels] {
                rgba.extend_from_slice(&[gray, gray, gray, 255]);
            }
        }
        other => {
            trace!(
                "unsupported color space {}",
                String::from_utf8_lossy(other)
            );
            return None;
        }
    }

    ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, rgba).map(DynamicImage::ImageRgba8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_gray_decodes() {
        let img = image_from_raw(&[0u8, 128, 255, 64], 2, 2, b"DeviceGray", 8).unwrap();
        assert_eq!((img.width(), img.height()), (2, 2));
    }

    #[test]
    fn test_short_rgb_data_is_rejected() {
        assert!(image_from_raw(&[1u8, 2, 3], 2, 2, b"DeviceRGB", 8).is_none());
    }

    #[test]
    fn test_unsupported_bit_depth_is_rejected() {
        assert!(image_from_raw(&[0u8; 16], 2, 2, b"DeviceGray", 1).is_none());
    }
}

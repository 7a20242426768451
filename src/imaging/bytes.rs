//! Bounds-checked integer reads over a header buffer.
//!
//! Every read returns `None` when `offset + width` runs past the end of the
//! buffer, so parsers can chain them with `?` and never index out of range.

fn array<const N: usize>(data: &[u8], offset: usize) -> Option<[u8; N]> {
    let end = offset.checked_add(N)?;
    data.get(offset..end)?.try_into().ok()
}

pub fn u16_be(data: &[u8], offset: usize) -> Option<u16> {
    array(data, offset).map(u16::from_be_bytes)
}

pub fn u16_le(data: &[u8], offset: usize) -> Option<u16> {
    array(data, offset).map(u16::from_le_bytes)
}

pub fn u32_be(data: &[u8], offset: usize) -> Option<u32> {
    array(data, offset).map(u32::from_be_bytes)
}

pub fn u32_le(data: &[u8], offset: usize) -> Option<u32> {
    array(data, offset).map(u32::from_le_bytes)
}

pub fn i32_le(data: &[u8], offset: usize) -> Option<i32> {
    array(data, offset).map(i32::from_le_bytes)
}

/// True when `data[offset..]` starts with `tag`.
pub fn has_tag(data: &[u8], offset: usize, tag: &[u8]) -> bool {
    offset
        .checked_add(tag.len())
        .and_then(|end| data.get(offset..end))
        .is_some_and(|window| window == tag)
}

//! Limine boot protocol requests.
//!
//! These are static structs with magic numbers baked in. The bootloader
//! scans the image for them between the start and end markers, fills in
//! response pointers, and only then jumps to `kmain`.
//!
//! Base revision 2 is requested on purpose: from revision 3 on, the
//! higher-half direct map only covers usable memory, and the VGA text
//! buffer at 0xB8000 would no longer be reachable through it.

use limine::BaseRevision;
#[cfg(feature = "framebuffer")]
use limine::request::FramebufferRequest;
use limine::request::{HhdmRequest, RequestsEndMarker, RequestsStartMarker};

#[cfg(feature = "framebuffer")]
use crate::framebuffer::{FRAMEBUFFER_INFO, FramebufferInfo};

#[used]
#[unsafe(link_section = ".requests_start_marker")]
static _START_MARKER: RequestsStartMarker = RequestsStartMarker::new();

#[used]
#[unsafe(link_section = ".requests")]
static BASE_REVISION: BaseRevision = BaseRevision::with_revision(2);

#[used]
#[unsafe(link_section = ".requests")]
static HHDM: HhdmRequest = HhdmRequest::new();

#[cfg(feature = "framebuffer")]
#[used]
#[unsafe(link_section = ".requests")]
static FRAMEBUFFER: FramebufferRequest = FramebufferRequest::new();

#[used]
#[unsafe(link_section = ".requests_end_marker")]
static _END_MARKER: RequestsEndMarker = RequestsEndMarker::new();

pub fn revision_supported() -> bool {
    BASE_REVISION.is_supported()
}

static HHDM_OFFSET: spin::Once<u64> = spin::Once::new();

/// Virtual address at which physical address 0 is mapped.
pub fn hhdm_offset() -> Option<u64> {
    if let Some(&offset) = HHDM_OFFSET.get() {
        return Some(offset);
    }
    let offset = HHDM.get_response()?.offset();
    Some(*HHDM_OFFSET.call_once(|| offset))
}

pub fn phys_to_virt(phys: u64) -> Option<*mut u8> {
    hhdm_offset().map(|offset| (offset + phys) as *mut u8)
}

/// Geometry of the first framebuffer Limine set up, if any.
#[cfg(feature = "framebuffer")]
pub fn framebuffer() -> Option<FramebufferInfo> {
    if let Some(&info) = FRAMEBUFFER_INFO.get() {
        return Some(info);
    }
    let response = FRAMEBUFFER.get_response()?;
    let fb = response.framebuffers().next()?;
    let info = FramebufferInfo {
        ptr: fb.addr(),
        width: fb.width() as usize,
        height: fb.height() as usize,
        pitch: fb.pitch() as usize,
    };
    Some(*FRAMEBUFFER_INFO.call_once(|| info))
}

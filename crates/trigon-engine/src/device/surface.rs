use super::SurfaceErrorAction;

/// Picks the back buffer format.
///
/// The requested format wins when supported. Otherwise any other 8-bit RGBA
/// family member is accepted (BGRA ordering and sRGB variants), in a fixed
/// order. Surfaces offering none of them are rejected.
pub(crate) fn choose_surface_format(
    supported: &[wgpu::TextureFormat],
    requested: wgpu::TextureFormat,
) -> Option<wgpu::TextureFormat> {
    if supported.contains(&requested) {
        return Some(requested);
    }

    let family = [
        wgpu::TextureFormat::Rgba8Unorm,
        wgpu::TextureFormat::Bgra8Unorm,
        wgpu::TextureFormat::Rgba8UnormSrgb,
        wgpu::TextureFormat::Bgra8UnormSrgb,
    ];
    family.into_iter().find(|f| supported.contains(f))
}

/// Picks the swap behavior: the requested mode, else the least-synchronized
/// supported one.
pub(crate) fn choose_present_mode(
    supported: &[wgpu::PresentMode],
    requested: wgpu::PresentMode,
) -> wgpu::PresentMode {
    if supported.contains(&requested) {
        return requested;
    }

    [
        wgpu::PresentMode::Immediate,
        wgpu::PresentMode::Mailbox,
        wgpu::PresentMode::Fifo,
    ]
    .into_iter()
    .find(|m| supported.contains(m))
    .unwrap_or(wgpu::PresentMode::Fifo)
}

pub(crate) fn choose_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
) -> wgpu::CompositeAlphaMode {
    if supported.contains(&wgpu::CompositeAlphaMode::Opaque) {
        return wgpu::CompositeAlphaMode::Opaque;
    }
    supported
        .first()
        .copied()
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Classifies a surface error. Lost/Outdated ask for a reconfigure with the
/// current (unchanged) configuration.
pub(crate) fn classify_surface_error(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::{CompositeAlphaMode as A, PresentMode as P, TextureFormat as T};

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn requested_format_wins() {
        let f = choose_surface_format(&[T::Bgra8Unorm, T::Rgba8Unorm], T::Rgba8Unorm);
        assert_eq!(f, Some(T::Rgba8Unorm));
    }

    #[test]
    fn falls_back_within_rgba8_family() {
        let f = choose_surface_format(
            &[T::Rgba16Float, T::Bgra8UnormSrgb, T::Bgra8Unorm],
            T::Rgba8Unorm,
        );
        assert_eq!(f, Some(T::Bgra8Unorm));
    }

    #[test]
    fn rejects_surfaces_without_rgba8() {
        assert_eq!(choose_surface_format(&[T::Rgba16Float], T::Rgba8Unorm), None);
        assert_eq!(choose_surface_format(&[], T::Rgba8Unorm), None);
    }

    // ── present mode ──────────────────────────────────────────────────────

    #[test]
    fn immediate_when_supported() {
        assert_eq!(choose_present_mode(&[P::Fifo, P::Immediate], P::Immediate), P::Immediate);
    }

    #[test]
    fn mailbox_then_fifo_fallback() {
        assert_eq!(choose_present_mode(&[P::Fifo, P::Mailbox], P::Immediate), P::Mailbox);
        assert_eq!(choose_present_mode(&[P::Fifo], P::Immediate), P::Fifo);
        assert_eq!(choose_present_mode(&[], P::Immediate), P::Fifo);
    }

    // ── alpha + errors ────────────────────────────────────────────────────

    #[test]
    fn alpha_prefers_opaque() {
        assert_eq!(choose_alpha_mode(&[A::PreMultiplied, A::Opaque]), A::Opaque);
        assert_eq!(choose_alpha_mode(&[A::PreMultiplied]), A::PreMultiplied);
        assert_eq!(choose_alpha_mode(&[]), A::Auto);
    }

    #[test]
    fn surface_errors_map_to_actions() {
        use wgpu::SurfaceError as E;
        assert_eq!(classify_surface_error(&E::Lost), SurfaceErrorAction::Reconfigured);
        assert_eq!(classify_surface_error(&E::Outdated), SurfaceErrorAction::Reconfigured);
        assert_eq!(classify_surface_error(&E::Timeout), SurfaceErrorAction::SkipFrame);
        assert_eq!(classify_surface_error(&E::OutOfMemory), SurfaceErrorAction::Fatal);
    }
}

//! Internal macros.

/// Bind the token for a [`Target`](backend::Target) and evaluate `$body`
/// with it.
///
/// `$body` is expanded once per target compiled into this binary, so it is
/// monomorphized against each concrete token type. Targets from other
/// architectures fall through to the portable token.
///
/// # Safety contract
///
/// The caller guarantees `$target` is supported on this machine. `Engine`
/// upholds that for every value it holds.
macro_rules! with_isa {
  ($target:expr, $isa:ident => $body:expr) => {{
    match $target {
      #[cfg(target_arch = "x86_64")]
      ::backend::Target::Sse2 => {
        // SAFETY: the caller guarantees the target is supported.
        #[allow(unsafe_code)]
        let $isa = unsafe { $crate::isa::Sse2::new_unchecked() };
        $body
      }
      #[cfg(target_arch = "x86_64")]
      ::backend::Target::Avx2 => {
        // SAFETY: the caller guarantees the target is supported.
        #[allow(unsafe_code)]
        let $isa = unsafe { $crate::isa::Avx2::new_unchecked() };
        $body
      }
      #[cfg(target_arch = "x86_64")]
      ::backend::Target::Avx512 => {
        // SAFETY: the caller guarantees the target is supported.
        #[allow(unsafe_code)]
        let $isa = unsafe { $crate::isa::Avx512::new_unchecked() };
        $body
      }
      #[cfg(target_arch = "x86_64")]
      ::backend::Target::Avx512Vbmi => {
        // SAFETY: the caller guarantees the target is supported.
        #[allow(unsafe_code)]
        let $isa = unsafe { $crate::isa::Avx512Vbmi::new_unchecked() };
        $body
      }
      #[cfg(target_arch = "aarch64")]
      ::backend::Target::Neon => {
        // SAFETY: the caller guarantees the target is supported.
        #[allow(unsafe_code)]
        let $isa = unsafe { $crate::isa::Neon::new_unchecked() };
        $body
      }
      #[cfg(target_arch = "wasm32")]
      ::backend::Target::Simd128 => {
        // SAFETY: the caller guarantees the target is supported.
        #[allow(unsafe_code)]
        let $isa = unsafe { $crate::isa::Simd128::new_unchecked() };
        $body
      }
      _ => {
        let $isa = $crate::isa::Portable;
        $body
      }
    }
  }};
}

/// Define a zero-sized token type for an [`Isa`](crate::Isa) target.
///
/// `new(caps)` hands out the token only when the target is supported, which
/// is what makes its safe methods sound. `new_unchecked` skips the check.
macro_rules! isa_token {
  ($(#[$meta:meta])* $name:ident => $target:expr) => {
    $(#[$meta])*
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct $name {
      _private: (),
    }

    impl $name {
      /// The token, if `caps` and the running architecture support it.
      #[inline]
      #[must_use]
      pub fn new(caps: ::platform::Caps) -> Option<Self> {
        if $target.is_supported(caps) {
          Some(Self { _private: () })
        } else {
          None
        }
      }

      /// The token without checking support.
      ///
      /// # Safety
      ///
      /// The CPU must support every feature in the target's requirements.
      #[inline]
      #[must_use]
      pub(crate) const unsafe fn new_unchecked() -> Self {
        Self { _private: () }
      }
    }

    impl $crate::isa::sealed::Sealed for $name {}
  };
}

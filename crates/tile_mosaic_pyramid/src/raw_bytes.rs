use core::ops::Deref;

/// A view of a value's contents as raw bytes. This is how pixel buffers get handed to rendering
/// backends and codecs that want untyped memory.
pub trait IntoRawBytes<'a> {
    type Output: Deref<Target = [u8]>;

    fn into_raw_bytes(&'a self) -> Self::Output;
}

impl<'a, T> IntoRawBytes<'a> for [T]
where
    T: 'static + bytemuck::Pod,
{
    type Output = &'a [u8];

    fn into_raw_bytes(&'a self) -> Self::Output {
        bytemuck::cast_slice(self)
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

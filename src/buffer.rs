use std::mem;

use crate::device::Device;

#[derive(Debug)]
pub struct VertexBuffer {
    id: u32,
}

impl VertexBuffer {
    /// Creates an array buffer, leaves it bound, and copies `positions` into it.
    pub fn new(device: &mut impl Device, positions: &[f32]) -> Self {
        let id = device.gen_buffer();
        device.bind_array_buffer(id);
        device.array_buffer_data(bytemuck::cast_slice(positions));

        VertexBuffer { id }
    }

    #[cfg(test)]
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn bind(&self, device: &mut impl Device) {
        device.bind_array_buffer(self.id);
    }

    pub fn unbind(&self, device: &mut impl Device) {
        device.bind_array_buffer(0);
    }

    pub fn delete(self, device: &mut impl Device) {
        device.delete_buffer(self.id);
    }
}

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferElementType {
    Float = gl::FLOAT,
}

impl BufferElementType {
    pub fn size_of(&self) -> usize {
        match self {
            Self::Float => mem::size_of::<f32>(),
        }
    }
}

#[derive(Debug)]
pub struct VertexBufferElement {
    pub count: u32,
    pub ty: BufferElementType,
    pub normalized: bool,
}

#[derive(Debug, Default)]
pub struct VertexBufferLayout {
    elements: Vec<VertexBufferElement>,
    pub stride: u32,
}

impl VertexBufferLayout {
    pub fn new() -> Self {
        VertexBufferLayout {
            elements: Vec::new(),
            stride: 0,
        }
    }

    pub fn push(&mut self, ty: BufferElementType, count: u32, normalized: bool) {
        self.stride += ty.size_of() as u32 * count;
        self.elements.push(VertexBufferElement {
            count,
            ty,
            normalized,
        });
    }

    pub fn elements(&self) -> &[VertexBufferElement] {
        &self.elements
    }
}

use crate::{
    buffer::{VertexBuffer, VertexBufferLayout},
    device::Device,
};

#[derive(Debug)]
pub struct VertexArray {
    id: u32,
}

impl VertexArray {
    pub fn new(device: &mut impl Device) -> Self {
        let id = device.gen_vertex_array();

        Self { id }
    }

    pub fn bind(&self, device: &mut impl Device) {
        device.bind_vertex_array(self.id);
    }

    pub fn unbind(&self, device: &mut impl Device) {
        device.bind_vertex_array(0);
    }

    /// Records `layout` for the attributes stored in `vb`, one slot per element.
    pub fn add_buffer(
        &mut self,
        device: &mut impl Device,
        vb: &VertexBuffer,
        layout: &VertexBufferLayout,
    ) {
        vb.bind(device);
        self.bind(device);

        let mut offset = 0;

        for (idx, element) in layout.elements().iter().enumerate() {
            device.vertex_attrib_pointer(
                idx as u32,
                element.count,
                element.ty,
                element.normalized,
                layout.stride,
                offset,
            );
            device.enable_vertex_attrib_array(idx as u32);

            offset += element.count * element.ty.size_of() as u32;
        }
    }

    pub fn delete(self, device: &mut impl Device) {
        device.delete_vertex_array(self.id);
    }
}

// @generated
// Wires up buf-generated protobuf code from `proto/`.
// Regenerate with `buf generate` from this directory, and the descriptor set
// with `buf build -o src/generated/inventory_descriptor.bin`.
// The prost files include!() their tonic counterparts.

pub mod inventory {
    pub mod v1 {
        include!("generated/inventory/v1/inventory.v1.rs");
    }

    pub use v1::*;

    /// Encoded `FileDescriptorSet` for `inventory.v1`, served over reflection.
    pub const FILE_DESCRIPTOR_SET: &[u8] = include_bytes!("generated/inventory_descriptor.bin");
}

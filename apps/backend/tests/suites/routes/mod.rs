mod error_shape;
mod parcels;

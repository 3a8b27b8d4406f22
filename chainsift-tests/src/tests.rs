mod contracts;
mod emitted;
mod hashes;
mod registry;

//! RoomRegistry 実装

mod inmemory;

pub use inmemory::InMemoryRoomRegistry;

//! 测试公共设施
#![allow(dead_code)]

pub mod mock_finger;
pub mod mock_hand;

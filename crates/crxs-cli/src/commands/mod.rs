pub mod convert_table;
pub mod kinematics;
pub mod p_coal;
pub mod version;

use super::{decode, Transport};
use crate::model::UserProfile;
use log::debug;

const USER_PATH: &str = "/user";

pub struct UserApi<'a, T> {
    transport: &'a T,
}

impl<'a, T: Transport> UserApi<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        UserApi { transport }
    }

    /// Profile of the authenticated taxpayer
    pub fn get(&self) -> anyhow::Result<UserProfile> {
        debug!("GET {USER_PATH}");
        let response = self.transport.get(USER_PATH)?;
        decode(USER_PATH, response)
    }
}

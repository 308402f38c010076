use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Authorization scopes a Spotify user can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Scope {
    UgcImageUpload,

    PlaylistModifyPrivate,
    PlaylistReadPrivate,
    PlaylistModifyPublic,
    PlaylistReadCollaborative,

    UserReadPrivate,
    UserReadEmail,

    UserReadPlaybackState,
    UserModifyPlaybackState,
    UserReadCurrentlyPlaying,

    UserLibraryModify,
    UserLibraryRead,

    UserReadPlaybackPosition,
    UserReadRecentlyPlayed,
    UserTopRead,

    AppRemoteControl,
    Streaming,

    UserFollowModify,
    UserFollowRead,
}

impl Scope {
    /// Space-delimited scope string, as sent in an authorization request.
    pub fn join<'a>(scopes: impl IntoIterator<Item = &'a Scope>) -> String {
        scopes
            .into_iter()
            .map(Scope::as_ref)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Every known scope.
    pub fn all() -> Vec<Scope> {
        Scope::iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scopes_render_as_kebab_case() {
        assert_eq!(Scope::UgcImageUpload.to_string(), "ugc-image-upload");
        assert_eq!(Scope::UserReadEmail.as_ref(), "user-read-email");
        assert_eq!(Scope::Streaming.to_string(), "streaming");
    }

    #[test]
    fn scopes_parse_from_wire_names() {
        assert_eq!(
            "user-top-read".parse::<Scope>().unwrap(),
            Scope::UserTopRead
        );
        assert!("user-read".parse::<Scope>().is_err());
    }

    #[test]
    fn join_is_space_delimited() {
        assert_eq!(
            Scope::join(&[Scope::UserReadPrivate, Scope::PlaylistReadPrivate]),
            "user-read-private playlist-read-private"
        );
    }

    #[test]
    fn all_lists_every_scope_once() {
        let all = Scope::all();
        assert_eq!(all.len(), 19);
        assert_eq!(all.first(), Some(&Scope::UgcImageUpload));
    }
}

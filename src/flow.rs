// src/flow.rs

/// Every screen the application can show.
///
/// Together with `NavEvent` this replaces a string-keyed "current screen"
/// selector: the screen set is a closed sum type and every transition is an
/// explicit event, so misspelled or unknown screen names are
/// unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Login,
    Registration,
    RecoveryEmail,
    RecoveryCode,
    RecoveryNewPassword,
    Home,
    Groups,
    CreateGroup,
    JoinGroup,
    EditGroup,
    EditGroupName,
    TestingList,
    TrainingLevel,
    TestSession,
    FinishTest,
    TestResult,
    Results,
    TestStatistics,
    TestDetailStatistics,
    EditProfile,
    ChangePassword,
}

/// A navigation trigger raised by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    OpenLogin,
    OpenRegistration,
    OpenRecovery,
    RecoveryCodeSent,
    RecoveryCodeAccepted,
    PasswordReset,
    LoggedIn,
    Registered,
    OpenGroups,
    OpenCreateGroup,
    OpenJoinGroup,
    GroupCreated,
    GroupJoined,
    OpenGroupEditor,
    OpenGroupNameEditor,
    GroupNameSaved,
    OpenGroupStatistics,
    OpenStatisticsDetail,
    OpenTests,
    LevelChosen,
    SessionStarted,
    SessionFinished,
    ResultShown,
    ResultAcknowledged,
    OpenResults,
    OpenProfile,
    OpenChangePassword,
    ProfileSaved,
    Back,
    GoHome,
}

impl Screen {
    /// Applies a navigation event.
    /// Events that make no sense on the current screen leave it unchanged.
    pub fn apply(self, event: NavEvent) -> Screen {
        use NavEvent::*;
        use Screen::*;

        match (self, event) {
            (Start, OpenLogin) => Login,
            (Start, OpenRegistration) => Registration,

            (Login, OpenRegistration) => Registration,
            (Login, OpenRecovery) => RecoveryEmail,
            (Login, LoggedIn) => Home,
            (Registration, OpenLogin) => Login,
            (Registration, Registered) => Home,

            (RecoveryEmail, RecoveryCodeSent) => RecoveryCode,
            (RecoveryCode, RecoveryCodeAccepted) => RecoveryNewPassword,
            (RecoveryNewPassword, PasswordReset) => Login,

            (Home, OpenGroups) => Groups,
            (Home, OpenTests) => TestingList,
            (Home, OpenResults) => Results,
            (Home, OpenProfile) => EditProfile,

            (Groups, OpenCreateGroup) => CreateGroup,
            (Groups, OpenJoinGroup) => JoinGroup,
            (Groups, OpenGroupEditor) => EditGroup,
            (CreateGroup, GroupCreated) => Groups,
            (JoinGroup, GroupJoined) => Groups,
            (EditGroup, OpenGroupNameEditor) => EditGroupName,
            (EditGroup, OpenGroupStatistics) => TestStatistics,
            (EditGroupName, GroupNameSaved) => EditGroup,
            (TestStatistics, OpenStatisticsDetail) => TestDetailStatistics,

            (TestingList, LevelChosen) => TrainingLevel,
            (TrainingLevel, SessionStarted) => TestSession,
            (TestSession, SessionFinished) => FinishTest,
            (FinishTest, ResultShown) => TestResult,
            (TestResult, ResultAcknowledged) => Home,

            (EditProfile, OpenChangePassword) => ChangePassword,
            (EditProfile, ProfileSaved) => Home,
            (ChangePassword, ProfileSaved) => EditProfile,

            (Login, Back) | (Registration, Back) => Start,
            (RecoveryEmail, Back) => Login,
            (RecoveryCode, Back) => RecoveryEmail,
            (RecoveryNewPassword, Back) => RecoveryCode,
            (CreateGroup, Back) | (JoinGroup, Back) | (EditGroup, Back) => Groups,
            (EditGroupName, Back) => EditGroup,
            (TestDetailStatistics, Back) => TestStatistics,
            (TestStatistics, Back) => EditGroup,
            (TrainingLevel, Back) => TestingList,
            (ChangePassword, Back) => EditProfile,
            (Groups, Back) | (TestingList, Back) | (Results, Back) | (EditProfile, Back) => Home,

            // The home shortcut exists only behind authentication.
            (
                Start | Login | Registration | RecoveryEmail | RecoveryCode | RecoveryNewPassword,
                GoHome,
            ) => self,
            (_, GoHome) => Home,

            _ => self,
        }
    }
}

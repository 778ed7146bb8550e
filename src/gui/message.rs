use crate::{
    core::route::{NavPayload, Route},
    gui::screens::{
        ScreenMessage, fraction_processing::FractionProcessingScreen,
        fraction_success::FractionSuccessScreen, fractionalization::FractionalizationScreen,
        kyc::KycScreen, loan_confirm::LoanConfirmScreen, loan_processing::LoanProcessingScreen,
        loan_setup::LoanSetupScreen, loan_success::LoanSuccessScreen, my_assets::MyAssetsScreen,
        my_loans::MyLoansScreen, not_found::NotFoundScreen, tokenization::TokenizationScreen,
        wallet_connect::WalletConnectScreen,
    },
};

#[derive(Debug, Clone)]
pub enum Message {
    WalletConnect(ScreenMessage<WalletConnectScreen>),
    Kyc(ScreenMessage<KycScreen>),
    Tokenization(ScreenMessage<TokenizationScreen>),
    MyAssets(ScreenMessage<MyAssetsScreen>),
    LoanSetup(ScreenMessage<LoanSetupScreen>),
    LoanConfirm(ScreenMessage<LoanConfirmScreen>),
    LoanProcessing(ScreenMessage<LoanProcessingScreen>),
    LoanSuccess(ScreenMessage<LoanSuccessScreen>),
    MyLoans(ScreenMessage<MyLoansScreen>),
    Fractionalization(ScreenMessage<FractionalizationScreen>),
    FractionProcessing(ScreenMessage<FractionProcessingScreen>),
    FractionSuccess(ScreenMessage<FractionSuccessScreen>),
    NotFound(ScreenMessage<NotFoundScreen>),
    Navigate(Route, NavPayload),
    Back,
    DismissNotice(u64),
}
